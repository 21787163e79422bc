use anyhow::{Context, Result};
use rsgrowth::{GrowthFactorSet, GrowthModel, LandCoverComparison, ModelConfig};

/// Example: predicting built-up growth from GeoTIFF rasters
/// Usage:
///   growth_from_tiff <landcover_t1.tif> <landcover_t2.tif> <config.json> <factor.tif>...
fn main() -> Result<()> {
    println!("=== Example: Urban growth from GeoTIFF rasters ===\n");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        anyhow::bail!(
            "usage: growth_from_tiff <landcover_t1.tif> <landcover_t2.tif> <config.json> <factor.tif>..."
        );
    }

    let config = ModelConfig::from_json_file(&args[2])?;
    println!("Configuration: {:?}\n", config);

    let mut landcover = LandCoverComparison::from_files(&args[0], &args[1])
        .context("Failed to load land cover rasters")?;
    let factors =
        GrowthFactorSet::from_files(&args[3..]).context("Failed to load growth factors")?;

    let output_dir = config.output_dir();
    #[cfg(feature = "csv")]
    landcover
        .compute_transition_matrix()
        .write_csv(&output_dir.join("transition_matrix.csv"))?;
    #[cfg(not(feature = "csv"))]
    landcover.compute_transition_matrix();

    let mut model = GrowthModel::from_config(&landcover, &factors, &config)?;
    model.predict(config.base()?)?;

    let report = model.evaluate_accuracy(config.cell_size_for(landcover.t1().geo_core()))?;
    report.write_json(output_dir.join("accuracy.json"))?;

    let output = model.export_predicted(output_dir.join("predicted.tif"))?;
    println!("\nPrediction written to {:?}", output);

    Ok(())
}
