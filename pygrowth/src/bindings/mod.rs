// Python bindings module
// Each file contains one PyO3 #[pyclass] definition

pub mod growth_factors;
pub mod growth_model;
pub mod land_cover;

pub use growth_factors::PyGrowthFactors;
pub use growth_model::PyGrowthModel;
pub use land_cover::PyLandCover;

use rsgrowth::LandCoverGrid;

/// Grid rows as plain integer lists
pub(crate) fn grid_rows(grid: &LandCoverGrid) -> Vec<Vec<i32>> {
    grid.cells()
        .chunks(grid.width())
        .map(|row| row.iter().map(|&v| v as i32).collect())
        .collect()
}
