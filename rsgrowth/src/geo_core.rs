use serde::{Deserialize, Serialize};

/// Spatial metadata of a raster grid
/// Carries the affine geotransform and the projection from the source raster
/// to any exported raster. The prediction never looks at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCore {
    /// GDAL-style affine transform:
    /// [origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]
    pub geo_transform: [f64; 6],
    /// Projection as WKT (empty when the source had none)
    pub projection: String,
    /// EPSG code, when known
    pub epsg: Option<i32>,
}

/// Unit cells with a north-up origin at (0, 0)
const UNIT_GEO_TRANSFORM: [f64; 6] = [0.0, 1.0, 0.0, 0.0, 0.0, -1.0];

impl GeoCore {
    /// Create a new GeoCore from a geotransform and a projection string
    pub fn new(geo_transform: [f64; 6], projection: impl Into<String>) -> Self {
        GeoCore {
            geo_transform,
            projection: projection.into(),
            epsg: None,
        }
    }

    /// Set EPSG code
    pub fn set_epsg(&mut self, epsg: Option<i32>) {
        self.epsg = epsg;
    }

    /// Edge length of a cell in map units (absolute pixel width)
    pub fn cell_size(&self) -> f64 {
        self.geo_transform[1].abs()
    }

    /// False for grids built in memory or read without a geotransform
    pub fn is_georeferenced(&self) -> bool {
        self.geo_transform != UNIT_GEO_TRANSFORM
    }
}

impl Default for GeoCore {
    fn default() -> Self {
        GeoCore::new(UNIT_GEO_TRANSFORM, "")
    }
}
