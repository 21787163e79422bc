use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rsgrowth::GrowthFactorSet;

/// GrowthFactors Python binding
/// Factor rasters in threshold order
#[pyclass]
pub struct PyGrowthFactors {
    pub(crate) inner: GrowthFactorSet,
}

#[pymethods]
impl PyGrowthFactors {
    #[new]
    fn new(paths: Vec<String>) -> PyResult<Self> {
        GrowthFactorSet::from_files(&paths)
            .map(|inner| PyGrowthFactors { inner })
            .map_err(|e| PyValueError::new_err(format!("Failed to load growth factors: {:#}", e)))
    }

    #[getter]
    fn factor_count(&self) -> usize {
        self.inner.factor_count()
    }

    /// (rows, cols)
    #[getter]
    fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    /// Value of factor `n` (1-based) at (row, col)
    fn factor_value(&self, n: usize, row: usize, col: usize) -> PyResult<f64> {
        let (rows, cols) = self.inner.shape();
        if n == 0 || n > self.inner.factor_count() || row >= rows || col >= cols {
            return Err(PyValueError::new_err(format!(
                "Index out of range: factor {}, row {}, col {}",
                n, row, col
            )));
        }
        Ok(self.inner.factor_value(n, row, col))
    }
}
