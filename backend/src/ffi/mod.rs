//! Python bindings (feature `pyo3`)
//!
//! Exposes the batch harness to Python so notebooks can drive the
//! simulator without re-implementing it.

pub mod simulator;
pub mod types;
