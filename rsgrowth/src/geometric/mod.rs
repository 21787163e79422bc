pub mod grid;
pub mod growth_factors;
pub mod land_cover;
