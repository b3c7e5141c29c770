use pyo3::prelude::*;
use pyo3::types::PyDict;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};
use rayon::prelude::*;

use crate::model::{PyStreetSegment, PyTraverseOptions, to_py_err};
use streetcost_core::prelude::*;

/// Python wrapper for TraversalState
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "TraversalState")]
#[derive(Clone)]
pub struct PyTraversalState {
    pub inner: TraversalState,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyTraversalState {
    #[new]
    #[pyo3(signature = (time=0, walk_distance=0.0))]
    pub fn new(time: Time, walk_distance: f64) -> Self {
        PyTraversalState {
            inner: TraversalState {
                walk_distance,
                time,
            },
        }
    }

    #[getter]
    fn time(&self) -> Time {
        self.inner.time
    }

    #[getter]
    fn walk_distance(&self) -> f64 {
        self.inner.walk_distance
    }

    fn __repr__(&self) -> String {
        format!(
            "TraversalState(time={}, walk_distance={})",
            self.inner.time, self.inner.walk_distance
        )
    }
}

/// Convert an optional traversal result to a Python dictionary or None
pub(crate) fn optional_result_to_py(
    py: Python<'_>,
    result: Option<&TraversalResult<'_>>,
) -> PyResult<Py<PyAny>> {
    match result {
        Some(result) => {
            let dict = PyDict::new(py);
            dict.set_item("weight", result.weight)?;
            dict.set_item("mode", result.mode.to_string())?;
            dict.set_item("walk_distance", result.state.walk_distance)?;
            dict.set_item("time", result.state.time)?;
            dict.set_item("state", PyTraversalState { inner: result.state })?;
            Ok(dict.into_any().unbind())
        }
        None => Ok(py.None()),
    }
}

#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
pub fn can_traverse(segment: &PyStreetSegment, options: &PyTraverseOptions) -> bool {
    segment.inner.can_traverse(&options.inner)
}

/// Cross a segment in its own direction.
///
/// Returns None when no enabled mode (including walking a bicycle) can use
/// the segment. Raises RuntimeError on a negative weight.
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
pub fn traverse(
    py: Python<'_>,
    segment: &PyStreetSegment,
    state: &PyTraversalState,
    options: &PyTraverseOptions,
) -> PyResult<Py<PyAny>> {
    let result = segment
        .inner
        .traverse(&state.inner, &options.inner)
        .map_err(to_py_err)?;
    optional_result_to_py(py, result.as_ref())
}

/// Cross a segment while searching backwards; time decreases.
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
pub fn traverse_back(
    py: Python<'_>,
    segment: &PyStreetSegment,
    state: &PyTraversalState,
    options: &PyTraverseOptions,
) -> PyResult<Py<PyAny>> {
    let result = segment
        .inner
        .traverse_back(&state.inner, &options.inner)
        .map_err(to_py_err)?;
    optional_result_to_py(py, result.as_ref())
}

/// Cross every segment from the same state, evaluated in parallel.
///
/// Returns one entry per segment, None where the segment is unusable.
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (segments, state, options, reverse=false))]
pub fn traverse_many<'py>(
    py: Python<'py>,
    segments: Vec<PyRef<'py, PyStreetSegment>>,
    state: &PyTraversalState,
    options: &PyTraverseOptions,
    reverse: bool,
) -> PyResult<Vec<Py<PyAny>>> {
    let inner: Vec<&StreetSegment> = segments.iter().map(|segment| &segment.inner).collect();
    let start = state.inner;
    let options = &options.inner;

    // Release the GIL while rayon evaluates the batch
    let results = py
        .detach(|| {
            inner
                .par_iter()
                .map(|segment| {
                    if reverse {
                        segment.traverse_back(&start, options)
                    } else {
                        segment.traverse(&start, options)
                    }
                })
                .collect::<Result<Vec<_>, Error>>()
        })
        .map_err(to_py_err)?;

    results
        .iter()
        .map(|result| optional_result_to_py(py, result.as_ref()))
        .collect()
}
