use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GrowthError, GrowthResult};
use crate::geometric::grid::LandCoverGrid;

/// Area in km² of the cells whose built-up membership differs between two grids
/// Counts flips in both directions, not the net growth.
pub fn builtup_area_difference(
    landcover1: &LandCoverGrid,
    landcover2: &LandCoverGrid,
    bu_class: u8,
    cell_size: f64,
) -> GrowthResult<f64> {
    landcover1.ensure_same_shape(landcover2, "land cover rasters")?;
    let changed = membership_mismatches(landcover1, landcover2, bu_class);
    Ok(changed as f64 * cell_size * cell_size / 1_000_000.0)
}

fn membership_mismatches(a: &LandCoverGrid, b: &LandCoverGrid, bu_class: u8) -> usize {
    a.cells()
        .iter()
        .zip(b.cells())
        .filter(|(&x, &y)| (x == bu_class) != (y == bu_class))
        .count()
}

/// Statistical and spatial agreement between a prediction and t2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Built-up change observed between t1 and t2 (km²)
    pub actual_builtup_change_km2: f64,
    /// Built-up change between t1 and the prediction (km²)
    pub predicted_builtup_change_km2: f64,
    /// None when t2 holds no built-up cell
    pub spatial_accuracy_percent: Option<f64>,
    /// Cells whose built-up membership differs between prediction and t2
    pub mismatched_cells: usize,
    /// Built-up cells in t2
    pub reference_builtup_cells: usize,
    pub cell_size: f64,
}

impl AccuracyReport {
    /// Compare a prediction with the observed land cover
    pub fn evaluate(
        t1: &LandCoverGrid,
        t2: &LandCoverGrid,
        predicted: &LandCoverGrid,
        bu_class: u8,
        cell_size: f64,
    ) -> GrowthResult<Self> {
        let actual_builtup_change_km2 = builtup_area_difference(t1, t2, bu_class, cell_size)?;
        let predicted_builtup_change_km2 =
            builtup_area_difference(t1, predicted, bu_class, cell_size)?;

        t2.ensure_same_shape(predicted, "predicted raster")?;
        let mismatched_cells = membership_mismatches(predicted, t2, bu_class);
        let reference_builtup_cells = t2.count(|v| v == bu_class);

        let spatial_accuracy_percent = (reference_builtup_cells > 0).then(|| {
            100.0 - (mismatched_cells as f64 / reference_builtup_cells as f64) * 100.0
        });

        Ok(AccuracyReport {
            actual_builtup_change_km2,
            predicted_builtup_change_km2,
            spatial_accuracy_percent,
            mismatched_cells,
            reference_builtup_cells,
            cell_size,
        })
    }

    /// Spatial accuracy in percent
    /// Fails with `DegenerateInput` when t2 has no built-up cell to compare with.
    pub fn spatial_accuracy(&self) -> GrowthResult<f64> {
        self.spatial_accuracy_percent.ok_or_else(|| {
            GrowthError::DegenerateInput("t2 contains no built-up cells".to_string())
        })
    }

    /// Save the report as pretty-printed JSON
    pub fn write_json(&self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        use anyhow::Context;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create output directory: {:?}", parent))?;
            }
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(path, json).context(format!("Failed to write report: {:?}", path))?;
        println!("Accuracy report saved to: {:?}", path);
        Ok(())
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Actual growth: {:.4} km², Predicted growth: {:.4} km²",
            self.actual_builtup_change_km2, self.predicted_builtup_change_km2
        )?;
        match self.spatial_accuracy_percent {
            Some(accuracy) => write!(f, "Spatial accuracy: {:.6}", accuracy),
            None => write!(f, "Spatial accuracy: N/A (no built-up cells in t2)"),
        }
    }
}
