use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use rsgrowth::collect::global_variables::{BUILTUP_CLASS, DEFAULT_KERNEL_SIZE};
use rsgrowth::collect::raster::encode_class_grid;
use rsgrowth::{
    validate_thresholds, AccuracyReport, Base, GrowthFactorSet, GrowthModel, LandCoverComparison,
    LandCoverGrid, ModelConfig,
};

use crate::bindings::grid_rows;
use crate::bindings::growth_factors::PyGrowthFactors;
use crate::bindings::land_cover::PyLandCover;

/// GrowthModel Python binding
/// Owns copies of the rasters so it outlives the Python inputs. The model
/// settings live in one `ModelConfig`; a `GrowthModel` is built per run.
#[pyclass]
pub struct PyGrowthModel {
    landcovers: LandCoverComparison,
    factors: GrowthFactorSet,
    config: ModelConfig,
    predicted: Option<LandCoverGrid>,
    accuracy: Option<AccuracyReport>,
}

#[pymethods]
impl PyGrowthModel {
    #[new]
    #[pyo3(signature = (landcover, factors, kernel_size = DEFAULT_KERNEL_SIZE))]
    fn new(
        landcover: PyRef<'_, PyLandCover>,
        factors: PyRef<'_, PyGrowthFactors>,
        kernel_size: usize,
    ) -> PyResult<Self> {
        // Reject bad kernels and misaligned rasters up front
        GrowthModel::new(&landcover.inner, &factors.inner, kernel_size)
            .map_err(|e| PyValueError::new_err(format!("Failed to create GrowthModel: {}", e)))?;

        Ok(PyGrowthModel {
            landcovers: landcover.inner.clone(),
            factors: factors.inner.clone(),
            config: ModelConfig {
                kernel_size,
                ..ModelConfig::default()
            },
            predicted: None,
            accuracy: None,
        })
    }

    /// Set the built-up threshold and one signed threshold per factor
    fn set_threshold(&mut self, builtup_threshold: u32, factor_thresholds: Vec<f64>) -> PyResult<()> {
        validate_thresholds(self.factors.factor_count(), &factor_thresholds)
            .map_err(|e| PyValueError::new_err(format!("Failed to set thresholds: {}", e)))?;
        self.config.builtup_threshold = builtup_threshold;
        self.config.factor_thresholds = factor_thresholds;
        println!("Threshold set for factors");
        Ok(())
    }

    /// Run the prediction from t1 (base=1) or t2 (base=2)
    #[pyo3(signature = (base = 1, show_progress = false))]
    fn predict(&mut self, base: u8, show_progress: bool) -> PyResult<Vec<Vec<i32>>> {
        let base = Base::try_from(base).map_err(|e| PyValueError::new_err(e.to_string()))?;
        // The factor set is never empty, so no thresholds means set_threshold was skipped
        if self.config.factor_thresholds.is_empty() {
            return Err(PyValueError::new_err(
                "Thresholds not set, call set_threshold first",
            ));
        }
        self.config.show_progress = show_progress;

        let mut model = GrowthModel::from_config(&self.landcovers, &self.factors, &self.config)
            .map_err(|e| PyValueError::new_err(format!("Failed to create GrowthModel: {}", e)))?;
        model
            .predict(base)
            .map_err(|e| PyValueError::new_err(format!("Failed to predict: {}", e)))?;

        let predicted = model
            .into_predicted()
            .ok_or_else(|| PyValueError::new_err("Prediction produced no grid"))?;
        let rows = grid_rows(&predicted);
        self.predicted = Some(predicted);
        self.accuracy = None;
        Ok(rows)
    }

    /// Compare the prediction with t2 and return the report as a dict
    /// Without `cell_size`, the pixel width of t1 is used (100 m when t1 has
    /// no georeferencing).
    #[pyo3(signature = (cell_size = None))]
    fn check_accuracy<'py>(
        &mut self,
        py: Python<'py>,
        cell_size: Option<f64>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let predicted = self
            .predicted
            .as_ref()
            .ok_or_else(|| PyValueError::new_err("No prediction yet, call predict first"))?;
        let report = AccuracyReport::evaluate(
            self.landcovers.t1(),
            self.landcovers.t2(),
            predicted,
            BUILTUP_CLASS,
            cell_size.unwrap_or_else(|| self.config.cell_size_for(self.landcovers.t1().geo_core())),
        )
        .map_err(|e| PyValueError::new_err(format!("Failed to check accuracy: {}", e)))?;
        println!("{}", report);

        let dict = PyDict::new(py);
        dict.set_item("actual_growth_km2", report.actual_builtup_change_km2)?;
        dict.set_item("predicted_growth_km2", report.predicted_builtup_change_km2)?;
        dict.set_item("spatial_accuracy", report.spatial_accuracy_percent)?;
        dict.set_item("mismatched_cells", report.mismatched_cells)?;
        self.accuracy = Some(report);
        Ok(dict)
    }

    /// Write the prediction as a GeoTIFF georeferenced like t1
    fn export_predicted(&self, path: String) -> PyResult<String> {
        let predicted = self
            .predicted
            .as_ref()
            .ok_or_else(|| PyValueError::new_err("No prediction yet, call predict first"))?;
        encode_class_grid(
            std::path::Path::new(&path),
            predicted,
            self.landcovers.t1().geo_core(),
        )
        .map(|p| p.to_string_lossy().into_owned())
        .map_err(|e| PyValueError::new_err(format!("Failed to export prediction: {:#}", e)))
    }

    /// Last accuracy report as JSON, None before check_accuracy
    fn accuracy_json(&self) -> PyResult<Option<String>> {
        self.accuracy
            .as_ref()
            .map(|r| {
                serde_json::to_string_pretty(r)
                    .map_err(|e| PyValueError::new_err(format!("Failed to serialize report: {}", e)))
            })
            .transpose()
    }

    /// Normalized transition matrix of the land cover pair
    fn transition_matrix(&mut self) -> Vec<Vec<f64>> {
        self.landcovers.compute_transition_matrix().normalized_rows()
    }

    #[getter]
    fn kernel_size(&self) -> usize {
        self.config.kernel_size
    }
}
