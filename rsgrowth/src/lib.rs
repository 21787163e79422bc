pub mod collect;
pub mod commons;
pub mod error;
pub mod geo_core;
pub mod geometric;
pub mod model;

pub use error::{GrowthError, GrowthResult};
pub use geo_core::GeoCore;
pub use geometric::grid::{FactorGrid, Grid, LandCoverGrid};
pub use geometric::growth_factors::GrowthFactorSet;
pub use geometric::land_cover::{LandCoverClass, LandCoverComparison, TransitionMatrix};
pub use model::accuracy::{builtup_area_difference, AccuracyReport};
pub use model::config::ModelConfig;
pub use model::growth_model::{validate_thresholds, Base, GrowthModel};
