use serde::{Deserialize, Serialize};

use crate::error::{GrowthError, GrowthResult};
use crate::geo_core::GeoCore;

/// Land cover class codes, one byte per cell
pub type LandCoverGrid = Grid<u8>;

/// Growth factor values (distances, slopes, ...)
pub type FactorGrid = Grid<f64>;

/// Row-major 2D raster with its spatial metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
    geo_core: GeoCore,
}

impl<T: Copy> Grid<T> {
    /// Create a grid from row-major cells
    /// Fails when a dimension is zero or the cell count does not match.
    pub fn new(width: usize, height: usize, cells: Vec<T>, geo_core: GeoCore) -> GrowthResult<Self> {
        if width == 0 || height == 0 || cells.len() != width * height {
            return Err(GrowthError::InvalidGrid {
                width,
                height,
                len: cells.len(),
            });
        }

        Ok(Grid {
            width,
            height,
            cells,
            geo_core,
        })
    }

    /// Grid of `width` x `height` cells all set to `value`
    pub fn filled(width: usize, height: usize, value: T) -> GrowthResult<Self> {
        Self::new(width, height, vec![value; width * height], GeoCore::default())
    }

    /// Build a grid from a list of equally long rows
    pub fn from_rows(rows: &[Vec<T>]) -> GrowthResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let cells: Vec<T> = rows.iter().flatten().copied().collect();
        if rows.iter().any(|r| r.len() != width) {
            return Err(GrowthError::InvalidGrid {
                width,
                height,
                len: cells.len(),
            });
        }
        Self::new(width, height, cells, GeoCore::default())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn geo_core(&self) -> &GeoCore {
        &self.geo_core
    }

    /// Replace the spatial metadata, keeping the cells
    pub fn with_geo_core(mut self, geo_core: GeoCore) -> Self {
        self.geo_core = geo_core;
        self
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.cells[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.cells[row * self.width + col] = value;
    }

    /// Number of cells for which `predicate` holds
    pub fn count(&self, predicate: impl Fn(T) -> bool) -> usize {
        self.cells.iter().filter(|&&v| predicate(v)).count()
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Fail with `ShapeMismatch` unless `other` has the same dimensions
    pub fn ensure_same_shape<U>(&self, other: &Grid<U>, what: &'static str) -> GrowthResult<()> {
        if self.same_shape(other) {
            Ok(())
        } else {
            Err(GrowthError::ShapeMismatch {
                what,
                expected: self.shape(),
                found: (other.height, other.width),
            })
        }
    }
}
