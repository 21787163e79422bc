pub mod global_variables;
#[cfg(feature = "gdal")]
pub mod raster;
