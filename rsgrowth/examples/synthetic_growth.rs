use anyhow::Result;
use rsgrowth::{
    Base, GrowthFactorSet, GrowthModel, Grid, LandCoverClass, LandCoverComparison, ModelConfig,
};

/// Example: growing a small synthetic town
/// A built-up core surrounded by vegetation, with a road running through
/// the middle column and a slope increasing to the east.
fn main() -> Result<()> {
    println!("=== Example: Synthetic urban growth ===\n");

    let size = 40;
    let mut t1 = Grid::filled(size, size, LandCoverClass::Vegetation.code())?;
    for r in 15..25 {
        for c in 15..25 {
            t1.set(r, c, LandCoverClass::BuiltUp.code());
        }
    }
    for r in 0..size {
        t1.set(r, 2, LandCoverClass::Water.code());
        t1.set(r, size - 1, LandCoverClass::Others.code());
    }

    // t2: the core has spread by two cells on every side
    let mut t2 = t1.clone();
    for r in 13..27 {
        for c in 13..27 {
            t2.set(r, c, LandCoverClass::BuiltUp.code());
        }
    }

    let road_distance = Grid::new(
        size,
        size,
        (0..size * size)
            .map(|i| ((i % size) as f64 - 20.0).abs() * 100.0)
            .collect(),
        Default::default(),
    )?;
    let slope = Grid::new(
        size,
        size,
        (0..size * size).map(|i| (i % size) as f64 * 0.5).collect(),
        Default::default(),
    )?;

    let mut landcover = LandCoverComparison::load(t1, t2)?;
    let matrix = landcover.compute_transition_matrix();
    for (i, row) in matrix.normalized_rows().iter().enumerate() {
        println!("  class {} -> {:?}", i + 1, row);
    }

    let factors = GrowthFactorSet::load(vec![road_distance, slope])?;

    // Close to the road, or flat enough
    let config = ModelConfig {
        builtup_threshold: 3,
        factor_thresholds: vec![-600.0, -5.0],
        output_path: Some("./output".to_string()),
        ..ModelConfig::default()
    };

    let mut model = GrowthModel::from_config(&landcover, &factors, &config)?;
    let predicted = model.predict(Base::T1)?;
    println!(
        "\nBuilt-up cells: {} at t1, {} predicted",
        landcover.t1().count(|v| v == 1),
        predicted.count(|v| v == 1)
    );

    let report = model.evaluate_accuracy(config.cell_size_for(landcover.t1().geo_core()))?;
    report.write_json(config.output_dir().join("accuracy.json"))?;

    #[cfg(feature = "csv")]
    if let Some(matrix) = landcover.transition_matrix() {
        matrix.write_csv(&config.output_dir().join("transition_matrix.csv"))?;
    }

    Ok(())
}
