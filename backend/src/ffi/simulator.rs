//! PyO3 wrapper for the batch harness
//!
//! # Example (from Python)
//!
//! ```python
//! from loot_simulator_core_rs import Simulator, policy_names, simulate_policy
//!
//! sim = Simulator(open("configs/party.json").read())
//! for name in policy_names():
//!     stats = sim.policy_stats(name, trials=500, seed=7)
//!     print(name, stats["weeks_mean"], stats["wasted_mean"])
//!
//! quick = simulate_policy(open("configs/party.json").read(), "NeedPriority", trials=100)
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::sync::Arc;

use super::types::{head_to_head_to_py, stats_report_to_py, trial_summary_to_py};
use crate::config::Roster;
use crate::drops::DropTable;
use crate::models::{Catalog, Party};
use crate::orchestrator::{sample_weeks_to_bis, TrialConfig};
use crate::policy::PolicyConfig;
use crate::stats::{compare, run_policy, BatchConfig, PolicyStats};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(e.to_string())
}

fn runtime_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyRuntimeError, _>(format!("Simulation failed: {}", e))
}

fn batch(trials: usize, seed: u64, week_limit: usize, auto_purchase: bool) -> BatchConfig {
    BatchConfig {
        trials,
        seed,
        trial: TrialConfig {
            week_limit,
            auto_purchase,
            record_events: false,
        },
    }
}

/// Python wrapper holding a validated party and the standard drop table
#[pyclass(name = "Simulator")]
pub struct PySimulator {
    party: Party,
    drop_table: DropTable,
}

#[pymethods]
impl PySimulator {
    /// Raises ValueError if the roster JSON is malformed or names unknown slots.
    #[new]
    fn new(roster_json: &str) -> PyResult<Self> {
        let roster = Roster::from_json(roster_json, Arc::new(Catalog::standard())).map_err(value_error)?;
        Ok(Self {
            party: roster.party(),
            drop_table: DropTable::standard(),
        })
    }

    #[pyo3(signature = (policy, trials=1000, seed=42, week_limit=100, auto_purchase=false))]
    fn policy_stats(
        &self,
        py: Python<'_>,
        policy: &str,
        trials: usize,
        seed: u64,
        week_limit: usize,
        auto_purchase: bool,
    ) -> PyResult<Py<PyDict>> {
        let config: PolicyConfig = policy.parse().map_err(value_error)?;
        let stats = run_policy(&self.party, &self.drop_table, &config, &batch(trials, seed, week_limit, auto_purchase))
            .map_err(runtime_error)?;
        stats_report_to_py(py, &stats.report(PolicyStats::DEFAULT_SLOW_THRESHOLD))
    }

    #[pyo3(signature = (policy_a, policy_b, trials=1000, seed=42, week_limit=100, auto_purchase=false))]
    #[allow(clippy::too_many_arguments)]
    fn head_to_head(
        &self,
        py: Python<'_>,
        policy_a: &str,
        policy_b: &str,
        trials: usize,
        seed: u64,
        week_limit: usize,
        auto_purchase: bool,
    ) -> PyResult<Py<PyDict>> {
        let a: PolicyConfig = policy_a.parse().map_err(value_error)?;
        let b: PolicyConfig = policy_b.parse().map_err(value_error)?;
        let h2h = compare(&self.party, &self.drop_table, &a, &b, &batch(trials, seed, week_limit, auto_purchase))
            .map_err(runtime_error)?;
        head_to_head_to_py(py, &h2h.report())
    }

    /// Run a single trial and return its full summary.
    #[pyo3(signature = (policy, seed, week_limit=100, auto_purchase=false))]
    fn trial(
        &self,
        py: Python<'_>,
        policy: &str,
        seed: u64,
        week_limit: usize,
        auto_purchase: bool,
    ) -> PyResult<Py<PyDict>> {
        let config: PolicyConfig = policy.parse().map_err(value_error)?;
        let trial = TrialConfig {
            week_limit,
            auto_purchase,
            record_events: false,
        };
        let summary = sample_weeks_to_bis(self.party.clone(), &config, &self.drop_table, &trial, seed)
            .map_err(runtime_error)?;
        trial_summary_to_py(py, &summary)
    }

    fn party_size(&self) -> usize {
        self.party.len()
    }
}

/// Names accepted by the `policy` arguments
#[pyfunction]
pub fn policy_names() -> Vec<String> {
    PolicyConfig::all().iter().map(PolicyConfig::name).collect()
}

/// One-shot batch run: parse `roster_json`, run `policy`, return the report.
#[pyfunction]
#[pyo3(signature = (roster_json, policy, trials=1000, seed=42, week_limit=100))]
pub fn simulate_policy(
    py: Python<'_>,
    roster_json: &str,
    policy: &str,
    trials: usize,
    seed: u64,
    week_limit: usize,
) -> PyResult<Py<PyDict>> {
    PySimulator::new(roster_json)?.policy_stats(py, policy, trials, seed, week_limit, false)
}
