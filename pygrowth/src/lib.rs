use pyo3::prelude::*;

mod bindings;

use bindings::{PyGrowthFactors, PyGrowthModel, PyLandCover};

/// Python bindings for pygrowth
/// Urban growth prediction with a land cover cellular automaton

#[pymodule]
fn pygrowth(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLandCover>()?;
    m.add_class::<PyGrowthFactors>()?;
    m.add_class::<PyGrowthModel>()?;

    // Aliases for Pythonic API (LandCover instead of PyLandCover)
    m.setattr("LandCover", m.getattr("PyLandCover")?)?;
    m.setattr("GrowthFactors", m.getattr("PyGrowthFactors")?)?;
    m.setattr("GrowthModel", m.getattr("PyGrowthModel")?)?;

    m.add(
        "__doc__",
        "Python bindings for pygrowth - urban growth cellular automaton",
    )?;

    Ok(())
}
