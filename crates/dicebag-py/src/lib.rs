// ABOUTME: Python bindings for the dicebag library using PyO3.
// ABOUTME: Exposes the Die class plus roll, parse, and simulate functions to Python.

use ::dicebag as core;
use ::dicebag::{Check, RollMethod};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

fn value_error(e: core::Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn method(name: &str) -> PyResult<RollMethod> {
    name.parse().map_err(value_error)
}

/// A die with integer faces and optional weights.
///
/// Example:
///     >>> d = Die([1, 2, 3], weights=[1, 1, 2], seed=42)
///     >>> d.roll("advantage")
///     3
///     >>> str(d)
///     '1,2,3:1,1,2'
#[pyclass]
pub struct Die {
    inner: core::Die,
}

#[pymethods]
impl Die {
    #[new]
    #[pyo3(signature = (faces, weights=None, seed=None))]
    fn new(faces: Vec<i64>, weights: Option<Vec<u32>>, seed: Option<u64>) -> PyResult<Self> {
        let set = match weights {
            Some(weights) => core::FaceSet::weighted(faces, weights),
            None => core::FaceSet::new(faces),
        }
        .map_err(value_error)?;
        Ok(Self {
            inner: core::Die::from_faces(set, seed),
        })
    }

    /// Parse a die from "faces" or "faces:weights" text.
    #[staticmethod]
    #[pyo3(signature = (text, seed=None))]
    fn parse(text: &str, seed: Option<u64>) -> PyResult<Self> {
        let inner = match seed {
            Some(seed) => core::parser::parse_seeded(text, seed),
            None => core::parse(text),
        }
        .map_err(value_error)?;
        Ok(Self { inner })
    }

    /// Standard die with faces 1..=size.
    #[staticmethod]
    #[pyo3(signature = (size, seed=None))]
    fn standard(size: usize, seed: Option<u64>) -> PyResult<Self> {
        let inner = match seed {
            Some(seed) => core::Die::standard_with_seed(size, seed),
            None => core::Die::standard(size),
        }
        .map_err(value_error)?;
        Ok(Self { inner })
    }

    #[getter]
    fn faces(&self) -> Vec<i64> {
        self.inner.faces().to_vec()
    }

    #[getter]
    fn weights(&self) -> Option<Vec<u32>> {
        self.inner.weights().map(<[u32]>::to_vec)
    }

    #[getter]
    fn seed(&self) -> Option<u64> {
        self.inner.seed()
    }

    /// Roll once. `method` is normal, advantage, disadvantage, or exploding.
    #[pyo3(signature = (method="normal"))]
    fn roll(&mut self, method: &str) -> PyResult<i64> {
        let method = self::method(method)?;
        self.inner.roll_with(method).map_err(value_error)
    }

    /// Roll `n` times with `method`.
    #[pyo3(signature = (n, method="normal"))]
    fn roll_n(&mut self, n: i64, method: &str) -> PyResult<Vec<i64>> {
        let method = self::method(method)?;
        self.inner.roll_n_with(n, method).map_err(value_error)
    }

    #[pyo3(signature = (n=2))]
    fn advantage(&mut self, n: i64) -> PyResult<i64> {
        self.inner.advantage(n).map_err(value_error)
    }

    #[pyo3(signature = (n=2))]
    fn disadvantage(&mut self, n: i64) -> PyResult<i64> {
        self.inner.disadvantage(n).map_err(value_error)
    }

    /// Roll against a difficulty class.
    ///
    /// With `crits`, the highest face always succeeds and the lowest always fails.
    #[pyo3(signature = (dc, method="normal", modifier=0, crits=false))]
    fn check(&mut self, dc: i64, method: &str, modifier: i64, crits: bool) -> PyResult<bool> {
        let check = Check::new(dc)
            .method(self::method(method)?)
            .modifier(modifier)
            .crits(crits);
        self.inner.check(&check).map_err(value_error)
    }

    /// Write the die as a JSON record, including its seed.
    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json(false).map_err(value_error)
    }

    #[staticmethod]
    fn from_json(text: &str) -> PyResult<Self> {
        let inner = core::Die::from_json(text).map_err(value_error)?;
        Ok(Self { inner })
    }

    fn __len__(&self) -> usize {
        self.inner.size()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!("Die('{}')", self.inner)
    }
}

/// Result of a Monte Carlo simulation.
#[pyclass]
#[derive(Clone)]
pub struct SimResult {
    inner: core::SimResult,
}

#[pymethods]
impl SimResult {
    #[getter]
    fn distribution(&self) -> HashMap<i64, usize> {
        self.inner.distribution.clone()
    }

    #[getter]
    fn min(&self) -> i64 {
        self.inner.min
    }

    #[getter]
    fn max(&self) -> i64 {
        self.inner.max
    }

    #[getter]
    fn mean(&self) -> f64 {
        self.inner.mean
    }

    #[getter]
    fn std_dev(&self) -> f64 {
        self.inner.std_dev
    }

    #[getter]
    fn n(&self) -> usize {
        self.inner.n
    }

    /// Get the mode (most common outcome).
    fn mode(&self) -> Option<i64> {
        self.inner.mode()
    }

    fn median(&self) -> f64 {
        self.inner.median()
    }

    /// Get outcomes sorted by value (for plotting).
    fn sorted_outcomes(&self) -> Vec<(i64, usize)> {
        self.inner.sorted_outcomes()
    }

    /// Get probability of each outcome.
    fn probabilities(&self) -> HashMap<i64, f64> {
        self.inner.probabilities()
    }

    fn __repr__(&self) -> String {
        format!(
            "SimResult(n={}, mean={:.2}, std_dev={:.2}, min={}, max={})",
            self.inner.n, self.inner.mean, self.inner.std_dev, self.inner.min, self.inner.max
        )
    }
}

/// Roll a die once.
///
/// Args:
///     die: Faces, optionally followed by weights, like "1,2,3" or "1,2,3:1,1,2"
///     method: normal, advantage, disadvantage, or exploding
///
/// Example:
///     >>> roll("1,2,3,4,5,6", method="advantage")
///     5
#[pyfunction]
#[pyo3(signature = (die, method="normal"))]
fn roll(die: &str, method: &str) -> PyResult<i64> {
    let method = self::method(method)?;
    core::parse(die)
        .and_then(|mut d| d.roll_with(method))
        .map_err(value_error)
}

/// Parse a die from "faces" or "faces:weights" text.
#[pyfunction]
fn parse(die: &str) -> PyResult<Die> {
    Die::parse(die, None)
}

/// Simulate rolling a die many times to get its distribution.
///
/// Args:
///     die: Faces, optionally followed by weights, like "1,2,3:1,1,2"
///     n: Number of trials to run (default: 10000)
///     method: normal, advantage, disadvantage, or exploding
///     seed: Optional seed for reproducible results
///
/// Example:
///     >>> sim = simulate("1,2,3:1,1,2", n=100000)
///     >>> sim.probabilities()[3]  # ~0.5
#[pyfunction]
#[pyo3(signature = (die, n=10000, method="normal", seed=None))]
fn simulate(die: &str, n: usize, method: &str, seed: Option<u64>) -> PyResult<SimResult> {
    let method = self::method(method)?;
    match seed {
        Some(seed) => core::simulate_seeded(die, method, n, seed),
        None => core::simulate(die, method, n),
    }
    .map(|inner| SimResult { inner })
    .map_err(value_error)
}

/// Python module for dicebag.
#[pymodule]
fn dicebag(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(roll, m)?)?;
    m.add_function(wrap_pyfunction!(parse, m)?)?;
    m.add_function(wrap_pyfunction!(simulate, m)?)?;
    m.add_class::<Die>()?;
    m.add_class::<SimResult>()?;
    Ok(())
}
