use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rsgrowth::{LandCoverClass, LandCoverComparison};

use crate::bindings::grid_rows;

/// LandCover Python binding
/// Pairs the land cover rasters of two dates
#[pyclass]
pub struct PyLandCover {
    pub(crate) inner: LandCoverComparison,
}

#[pymethods]
impl PyLandCover {
    #[new]
    fn new(t1_path: String, t2_path: String) -> PyResult<Self> {
        match LandCoverComparison::from_files(&t1_path, &t2_path) {
            Ok(inner) => Ok(PyLandCover { inner }),
            Err(e) => Err(PyValueError::new_err(format!(
                "Failed to load land cover rasters: {:#}",
                e
            ))),
        }
    }

    /// Normalized transition matrix, one row per class at t1
    fn transition_matrix(&mut self) -> Vec<Vec<f64>> {
        self.inner.compute_transition_matrix().normalized_rows()
    }

    /// Raw transition counts
    fn transition_counts(&mut self) -> Vec<Vec<u64>> {
        self.inner.compute_transition_matrix().count_rows()
    }

    /// Write the normalized transition matrix as CSV
    fn write_transition_csv(&mut self, path: String) -> PyResult<()> {
        self.inner
            .compute_transition_matrix()
            .write_csv(std::path::Path::new(&path))
            .map_err(|e| PyValueError::new_err(format!("Failed to write CSV: {:#}", e)))
    }

    /// Names of the known land cover classes, by class code
    #[staticmethod]
    fn class_names() -> Vec<(u8, &'static str)> {
        LandCoverClass::ALL
            .iter()
            .map(|class| (class.code(), class.name()))
            .collect()
    }

    #[getter]
    fn feature_count(&self) -> usize {
        self.inner.feature_count()
    }

    /// (rows, cols)
    #[getter]
    fn shape(&self) -> (usize, usize) {
        (self.inner.rows(), self.inner.cols())
    }

    fn t1(&self) -> Vec<Vec<i32>> {
        grid_rows(self.inner.t1())
    }

    fn t2(&self) -> Vec<Vec<i32>> {
        grid_rows(self.inner.t2())
    }
}
