use geo::{Coord, LineString};
use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pymethods};

use streetcost_core::prelude::*;

pub(crate) fn to_py_err(error: Error) -> PyErr {
    match error {
        Error::NegativeWeight { .. } | Error::TimeOverflow { .. } => {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(error.to_string())
        }
        Error::IoError(_) => PyErr::new::<pyo3::exceptions::PyOSError, _>(error.to_string()),
        _ => PyErr::new::<pyo3::exceptions::PyValueError, _>(error.to_string()),
    }
}

/// StreetSegment
///
/// One traversable stretch of street with its permissions and the
/// effective lengths used by the cost model.
///
/// Example:
///
/// .. code-block:: python
///
///     segment = StreetSegment([(0.0, 0.0), (0.0, 100.0)], "Main Street", 100.0, "all")
///     segment.set_elevation_profile([(0.0, 10.0), (100.0, 14.0)])
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "StreetSegment")]
pub struct PyStreetSegment {
    pub(crate) inner: StreetSegment,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyStreetSegment {
    #[new]
    #[pyo3(signature = (coordinates, name, length, permission = "all", back = false))]
    pub fn new(
        coordinates: Vec<(f64, f64)>,
        name: &str,
        length: f64,
        permission: &str,
        back: bool,
    ) -> PyResult<Self> {
        let permission: StreetTraversalPermission = permission.parse().map_err(to_py_err)?;
        let geometry: LineString<f64> = coordinates.into_iter().map(Coord::from).collect();

        let inner =
            StreetSegment::new(geometry, name, length, permission, back).map_err(to_py_err)?;
        Ok(PyStreetSegment { inner })
    }

    #[getter]
    fn name(&self) -> &str {
        self.inner.name()
    }

    #[getter]
    fn length(&self) -> f64 {
        self.inner.length()
    }

    #[getter]
    fn permission(&self) -> &'static str {
        self.inner.permission().name()
    }

    #[getter]
    fn wheelchair_accessible(&self) -> bool {
        self.inner.is_wheelchair_accessible()
    }

    #[getter]
    fn max_slope(&self) -> f64 {
        self.inner.max_slope()
    }

    /// Coordinates of the segment geometry as (x, y) tuples
    fn coordinates(&self) -> Vec<(f64, f64)> {
        self.inner.geometry().coords().map(|c| (c.x, c.y)).collect()
    }

    fn set_wheelchair_accessible(&mut self, wheelchair_accessible: bool) {
        self.inner.set_wheelchair_accessible(wheelchair_accessible);
    }

    fn set_slope_override(&mut self, slope_override: bool) {
        self.inner.set_slope_override(slope_override);
    }

    fn set_bicycle_safety_effective_length(&mut self, length: f64) -> PyResult<()> {
        self.inner
            .set_bicycle_safety_effective_length(length)
            .map_err(to_py_err)
    }

    fn set_slope_speed_effective_length(&mut self, length: f64) -> PyResult<()> {
        self.inner
            .set_slope_speed_effective_length(length)
            .map_err(to_py_err)
    }

    /// Attach (distance, elevation) samples and derive slope cost and slope
    /// speed lengths with the default grade model, as the batch elevation
    /// pass does
    fn set_elevation_profile(&mut self, samples: Vec<(f64, f64)>) -> PyResult<()> {
        let profile = ElevationProfile::try_from(samples).map_err(to_py_err)?;
        self.inner
            .set_elevation_profile_with_speed(profile, &GradeCostModel::default())
            .map_err(to_py_err)?;
        Ok(())
    }

    fn elevation_profile(&self) -> Option<Vec<(f64, f64)>> {
        self.inner
            .elevation_profile()
            .map(|profile| profile.clone().into())
    }

    fn profile_slice(&self, start: f64, end: f64) -> Option<Vec<(f64, f64)>> {
        self.inner.profile_slice(start, end).map(Into::into)
    }

    fn __repr__(&self) -> String {
        format!(
            "StreetSegment(name='{}', length={}, permission={})",
            self.inner.name(),
            self.inner.length(),
            self.inner.permission()
        )
    }
}

/// TraverseOptions
///
/// Parameters of one search request: enabled modes, optimization criterion,
/// speed and accessibility requirements.
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "TraverseOptions")]
pub struct PyTraverseOptions {
    pub(crate) inner: TraverseOptions,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyTraverseOptions {
    #[new]
    #[pyo3(signature = (
        modes = vec!["walk".to_string()],
        optimize_for = "quick",
        speed = DEFAULT_WALK_SPEED,
        walk_reluctance = 1.0,
        wheelchair_accessible = false,
        max_slope = DEFAULT_MAX_SLOPE,
        max_walk_distance = None,
        overage_reluctance = 1.0,
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        modes: Vec<String>,
        optimize_for: &str,
        speed: f64,
        walk_reluctance: f64,
        wheelchair_accessible: bool,
        max_slope: f64,
        max_walk_distance: Option<f64>,
        overage_reluctance: f64,
    ) -> PyResult<Self> {
        let document = serde_json::json!({
            "modes": modes,
            "optimize_for": optimize_for,
            "speed": speed,
            "walk_reluctance": walk_reluctance,
            "wheelchair_accessible": wheelchair_accessible,
            "max_slope": max_slope,
        });
        let mut inner: TraverseOptions = serde_json::from_value(document)
            .map_err(|e| to_py_err(Error::Json(e)))?;

        if let Some(max_walk_distance) = max_walk_distance {
            inner.walk_factor = WalkFactor::Limited {
                max_walk_distance,
                overage_reluctance,
            };
        }
        inner.validate().map_err(to_py_err)?;
        Ok(PyTraverseOptions { inner })
    }

    #[staticmethod]
    fn from_toml(document: &str) -> PyResult<Self> {
        let inner = TraverseOptions::from_toml_str(document).map_err(to_py_err)?;
        Ok(PyTraverseOptions { inner })
    }

    #[staticmethod]
    fn from_json(document: &str) -> PyResult<Self> {
        let inner = TraverseOptions::from_json_str(document).map_err(to_py_err)?;
        Ok(PyTraverseOptions { inner })
    }

    #[staticmethod]
    fn from_path(path: &str) -> PyResult<Self> {
        let inner = TraverseOptions::from_path(path).map_err(to_py_err)?;
        Ok(PyTraverseOptions { inner })
    }

    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| to_py_err(Error::Json(e)))
    }

    #[getter]
    fn modes(&self) -> Vec<String> {
        self.inner.modes.iter().map(|mode| mode.to_string()).collect()
    }

    #[getter]
    fn speed(&self) -> f64 {
        self.inner.speed
    }

    fn __repr__(&self) -> String {
        format!("TraverseOptions({:?})", self.inner)
    }
}
