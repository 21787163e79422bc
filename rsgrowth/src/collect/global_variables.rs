use std::path::PathBuf;

pub const TEMP_PATH: &str = "./temp";

/// Class code of built-up land
pub const BUILTUP_CLASS: u8 = 1;

/// Neighborhood kernel edge length used when none is given
pub const DEFAULT_KERNEL_SIZE: usize = 3;

/// Cell edge length in meters used for area conversions
pub const DEFAULT_CELL_SIZE: f64 = 100.0;

/// No-data value written to exported class rasters
pub const NO_DATA_VALUE: f64 = 0.0;

/// Rows between two status lines when progress bars are disabled
pub const PROGRESS_INTERVAL: usize = 500;

pub fn get_temp_path() -> PathBuf {
    PathBuf::from(TEMP_PATH)
}
