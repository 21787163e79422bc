pub mod accuracy;
pub mod config;
pub mod growth_model;
