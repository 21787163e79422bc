use anyhow::{Context, Result};
use gdal::raster::{Buffer, GdalType};
use gdal::{Dataset, DriverManager};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::collect::global_variables::NO_DATA_VALUE;
use crate::geo_core::GeoCore;
use crate::geometric::grid::{FactorGrid, Grid, LandCoverGrid};

/// Raster file failures, carried inside `anyhow::Error`
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("raster file not found: {0:?}")]
    FileNotFound(PathBuf),

    #[error("unreadable raster {path:?}: {reason}")]
    UnreadableFormat { path: PathBuf, reason: String },

    #[error("failed to write raster {path:?}: {reason}")]
    WriteError { path: PathBuf, reason: String },
}

/// Read band 1 of a single-band raster as land cover class codes
pub fn decode_class_grid(path: &Path) -> Result<LandCoverGrid> {
    decode_band::<u8>(path)
}

/// Read band 1 of a single-band raster as growth factor values
pub fn decode_factor_grid(path: &Path) -> Result<FactorGrid> {
    decode_band::<f64>(path)
}

fn decode_band<T: GdalType + Copy>(path: &Path) -> Result<Grid<T>> {
    if !path.exists() {
        return Err(RasterError::FileNotFound(path.to_path_buf()).into());
    }

    let unreadable = |e: gdal::errors::GdalError| RasterError::UnreadableFormat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let dataset = Dataset::open(path).map_err(unreadable)?;
    let (width, height) = dataset.raster_size();

    // Rasters without georeferencing get unit cells
    let geo_transform = dataset
        .geo_transform()
        .unwrap_or_else(|_| GeoCore::default().geo_transform);
    let mut geo_core = GeoCore::new(geo_transform, dataset.projection());
    geo_core.set_epsg(dataset.spatial_ref().ok().and_then(|srs| srs.auth_code().ok()));

    let band = dataset.rasterband(1).map_err(unreadable)?;
    let buffer = band
        .read_as::<T>((0, 0), (width, height), (width, height), None)
        .map_err(unreadable)?;
    let (_, cells) = buffer.into_shape_and_vec();

    let grid = Grid::new(width, height, cells, geo_core)
        .context(format!("Invalid raster dimensions in {:?}", path))?;
    println!("Raster loaded: {:?} ({} x {})", path, width, height);
    Ok(grid)
}

/// Write a class grid as a single-band byte GeoTIFF
/// Uses the supplied geotransform and projection and marks 0 as no-data.
pub fn encode_class_grid(path: &Path, grid: &LandCoverGrid, geo_core: &GeoCore) -> Result<PathBuf> {
    let write_error = |reason: String| RasterError::WriteError {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
    }

    let driver = DriverManager::get_driver_by_name("GTiff")
        .map_err(|e| write_error(format!("GTiff driver unavailable: {}", e)))?;

    let mut dataset = driver
        .create_with_band_type::<u8, _>(path, grid.width(), grid.height(), 1)
        .map_err(|e| write_error(e.to_string()))?;

    dataset
        .set_geo_transform(&geo_core.geo_transform)
        .map_err(|e| write_error(e.to_string()))?;
    if !geo_core.projection.is_empty() {
        dataset
            .set_projection(&geo_core.projection)
            .map_err(|e| write_error(e.to_string()))?;
    }

    {
        let mut band = dataset
            .rasterband(1)
            .map_err(|e| write_error(e.to_string()))?;
        let mut buffer = Buffer::new((grid.width(), grid.height()), grid.cells().to_vec());
        band.write((0, 0), (grid.width(), grid.height()), &mut buffer)
            .map_err(|e| write_error(e.to_string()))?;
        band.set_no_data_value(Some(NO_DATA_VALUE))
            .map_err(|e| write_error(e.to_string()))?;
    }

    println!("Raster saved to: {:?}", path);
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_class_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("landcover.tif");
        let geo_core = GeoCore::new([500_000.0, 30.0, 0.0, 6_500_000.0, 0.0, -30.0], "");
        let grid = Grid::from_rows(&[vec![1u8, 2, 3], vec![4, 1, 2]])
            .unwrap()
            .with_geo_core(geo_core.clone());

        encode_class_grid(&path, &grid, &geo_core).unwrap();
        let decoded = decode_class_grid(&path).unwrap();

        assert_eq!(decoded.shape(), (2, 3));
        assert_eq!(decoded.cells(), grid.cells());
        assert_eq!(decoded.geo_core().geo_transform, geo_core.geo_transform);
        assert_eq!(decoded.geo_core().cell_size(), 30.0);
    }

    #[test]
    fn test_decode_factor_grid_as_f64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factor.tif");
        let grid = Grid::from_rows(&[vec![7u8, 8], vec![9, 10]]).unwrap();
        encode_class_grid(&path, &grid, grid.geo_core()).unwrap();

        let factor = decode_factor_grid(&path).unwrap();
        assert_eq!(factor.cells(), &[7.0, 8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_decode_missing_file() {
        let err = decode_class_grid(Path::new("/nonexistent/landcover.tif")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RasterError>(),
            Some(RasterError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_decode_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.tif");
        std::fs::write(&path, "not a raster").unwrap();
        let err = decode_class_grid(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RasterError>(),
            Some(RasterError::UnreadableFormat { .. })
        ));
    }
}
