//! Python FFI bindings via PyO3.
//!
//! Exposes polynomial motions, blends and flattening to Python as
//! `PolynomialMotion`, `PolynomialMotionBlend` and `flatten`.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from motion_blend import PolynomialMotion, PolynomialMotionBlend
//!
//! # coefficients are lowest order first: x(t) = -0.8 + 1.0·t + 0.5·t²
//! m1 = PolynomialMotion(offset=0.0, coeffs=[-0.8, 1.0, 0.5])
//! m2 = PolynomialMotion(offset=1.0, coeffs=[0.0, 3.0, 5.0])
//! mb = PolynomialMotionBlend(m1, m2, 2.5, 2.0)
//!
//! print(mb.at(2.5))              # float in, float out
//! print(mb.d_at([2.0, 3.0, 5.0])) # list in, list out
//! print(mb.range)                 # (2.5, 4.5)
//! ```

use std::sync::Arc;

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;

use crate::blend::{BlendConfig, BlendedMotion};
use crate::error::MotionError;
use crate::flatten::flatten as flatten_motion;
use crate::motion::{Motion, MotionNode};
use crate::polynomial::PolynomialMotion;

fn to_py_err(e: MotionError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Evaluate `motion` at a float or a sequence of floats, mirroring the input shape.
fn evaluate(
    py: Python<'_>,
    motion: &MotionNode,
    t: &Bound<'_, PyAny>,
    velocity: bool,
) -> PyResult<PyObject> {
    if let Ok(t) = t.extract::<f64>() {
        let x = if velocity { motion.d_at(t) } else { motion.at(t) };
        return Ok(x.into_py(py));
    }
    let times: Vec<f64> = t.extract()?;
    let xs = if velocity {
        motion.d_at_all(&times)
    } else {
        motion.at_all(&times)
    };
    Ok(xs.into_py(py))
}

fn node_from_py(obj: &Bound<'_, PyAny>) -> PyResult<MotionNode> {
    if let Ok(p) = obj.downcast::<PyPolynomialMotion>() {
        return Ok(MotionNode::Polynomial(p.get().inner.clone()));
    }
    if let Ok(b) = obj.downcast::<PyBlendedMotion>() {
        return Ok(MotionNode::Blended(b.get().inner.clone()));
    }
    Err(PyTypeError::new_err(
        "expected PolynomialMotion or PolynomialMotionBlend",
    ))
}

// ── PolynomialMotion ─────────────────────────────────────────────────────────

/// One-dimensional polynomial motion.
///
/// Args:
///     offset: time origin of the polynomial
///     coeffs: coefficients, lowest order first (at least one)
#[pyclass(name = "PolynomialMotion", frozen)]
pub struct PyPolynomialMotion {
    inner: Arc<PolynomialMotion>,
}

impl PyPolynomialMotion {
    fn node(&self) -> MotionNode {
        MotionNode::Polynomial(self.inner.clone())
    }
}

#[pymethods]
impl PyPolynomialMotion {
    /// Create a polynomial motion. Raises ValueError for an empty `coeffs`.
    #[new]
    pub fn new(offset: f64, coeffs: Vec<f64>) -> PyResult<Self> {
        let p = PolynomialMotion::new(offset, coeffs).map_err(to_py_err)?;
        Ok(Self { inner: Arc::new(p) })
    }

    /// Time origin.
    #[getter]
    pub fn offset(&self) -> f64 {
        self.inner.offset_time()
    }

    /// Coefficients, lowest order first.
    #[getter]
    pub fn coeffs(&self) -> Vec<f64> {
        self.inner.coefficients().to_vec()
    }

    /// Polynomial degree.
    #[getter]
    pub fn degree(&self) -> usize {
        self.inner.degree()
    }

    /// Position at time(s) `t`.
    pub fn at(&self, py: Python<'_>, t: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        evaluate(py, &self.node(), t, false)
    }

    /// Velocity at time(s) `t`.
    pub fn d_at(&self, py: Python<'_>, t: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        evaluate(py, &self.node(), t, true)
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "PolynomialMotion(offset={}, coeffs={:?})",
            self.inner.offset_time(),
            self.inner.coefficients()
        )
    }
}

// ── PolynomialMotionBlend ───────────────────────────────────────────────────

/// C¹ blend of two motions over `[offset, offset + horizon]`.
///
/// Args:
///     m1:      motion followed before `offset`
///     m2:      motion followed after `offset + horizon`
///     offset:  start of the blend
///     horizon: length of the blend, > 0
///     flatten: simplify m1 and m2, assuming nothing before `offset` is queried again
#[pyclass(name = "PolynomialMotionBlend", frozen)]
pub struct PyBlendedMotion {
    inner: Arc<BlendedMotion>,
}

#[pymethods]
impl PyBlendedMotion {
    /// Create a blend. Raises ValueError if `horizon <= 0` or on overflow.
    #[new]
    #[pyo3(signature = (m1, m2, offset, horizon, flatten=false))]
    pub fn new(
        m1: &Bound<'_, PyAny>,
        m2: &Bound<'_, PyAny>,
        offset: f64,
        horizon: f64,
        flatten: bool,
    ) -> PyResult<Self> {
        let config = BlendConfig {
            horizon,
            flatten_before: flatten,
            prune_after: flatten,
            ..BlendConfig::default()
        };
        let blend = BlendedMotion::with_config(node_from_py(m1)?, node_from_py(m2)?, offset, &config)
            .map_err(to_py_err)?;
        Ok(Self {
            inner: Arc::new(blend),
        })
    }

    /// Start of the blend.
    #[getter]
    pub fn offset(&self) -> f64 {
        self.inner.pivot_time()
    }

    /// Length of the blend.
    #[getter]
    pub fn horizon(&self) -> f64 {
        self.inner.horizon()
    }

    /// `(offset, offset + horizon)`.
    #[getter]
    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    /// The cubic transition polynomial.
    #[getter]
    pub fn blend(&self) -> PyPolynomialMotion {
        PyPolynomialMotion {
            inner: self.inner.shared_transition().clone(),
        }
    }

    /// Depth of the motion tree rooted here.
    #[getter]
    pub fn depth(&self) -> usize {
        MotionNode::Blended(self.inner.clone()).depth()
    }

    /// Position at time(s) `t`.
    pub fn at(&self, py: Python<'_>, t: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        evaluate(py, &MotionNode::Blended(self.inner.clone()), t, false)
    }

    /// Velocity at time(s) `t`.
    pub fn d_at(&self, py: Python<'_>, t: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        evaluate(py, &MotionNode::Blended(self.inner.clone()), t, true)
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "PolynomialMotionBlend(offset={}, horizon={})",
            self.inner.pivot_time(),
            self.inner.horizon()
        )
    }
}

// ── flatten ──────────────────────────────────────────────────────────────────

/// Collapse `motion` into a polynomial matching its position and velocity at `anchor`.
///
/// Coefficients above first order are zero. `order` is clamped to `1..=MAX_FLATTEN_ORDER`.
#[pyfunction]
#[pyo3(signature = (motion, anchor, order=1))]
pub fn flatten(motion: &Bound<'_, PyAny>, anchor: f64, order: usize) -> PyResult<PyPolynomialMotion> {
    let node = node_from_py(motion)?;
    Ok(PyPolynomialMotion {
        inner: Arc::new(flatten_motion(&node, anchor, order)),
    })
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Temporal blending of 1D motion estimates.
#[pymodule]
pub fn motion_blend(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPolynomialMotion>()?;
    m.add_class::<PyBlendedMotion>()?;
    m.add_function(wrap_pyfunction!(flatten, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
