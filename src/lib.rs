use pyo3::prelude::*;

use model::{PyStreetSegment, PyTraverseOptions};
use routing::{PyTraversalState, can_traverse, traverse, traverse_back, traverse_many};

pub mod model;
pub mod routing;

/// A Python module implemented in Rust.
#[pymodule]
fn streetcost(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyStreetSegment>()?;
    m.add_class::<PyTraverseOptions>()?;
    m.add_class::<PyTraversalState>()?;

    m.add_function(wrap_pyfunction!(can_traverse, m)?)?;
    m.add_function(wrap_pyfunction!(traverse, m)?)?;
    m.add_function(wrap_pyfunction!(traverse_back, m)?)?;
    m.add_function(wrap_pyfunction!(traverse_many, m)?)?;
    Ok(())
}

#[cfg(feature = "stubgen")]
pyo3_stub_gen::define_stub_info_gatherer!(stub_info);
