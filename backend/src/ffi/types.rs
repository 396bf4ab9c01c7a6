//! Type conversion utilities for FFI boundary
//!
//! Converts report types into Python dicts.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::orchestrator::TrialSummary;
use crate::stats::{HeadToHeadReport, StatsReport};

pub fn stats_report_to_py(py: Python<'_>, report: &StatsReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("policy", &report.policy)?;
    dict.set_item("trials", report.trials)?;
    dict.set_item("weeks_mean", report.weeks_mean)?;
    dict.set_item("weeks_pstdev", report.weeks_pstdev)?;
    dict.set_item("weeks_max", report.weeks_max)?;
    dict.set_item("weeks_over_threshold", report.weeks_over_threshold)?;
    dict.set_item("slow_threshold", report.slow_threshold)?;
    dict.set_item("wasted_mean", report.wasted_mean)?;
    dict.set_item("wasted_pstdev", report.wasted_pstdev)?;
    dict.set_item("party_bis_rate", report.party_bis_rate)?;
    dict.set_item("mean_bis_by_week", report.mean_bis_by_week.clone())?;

    let wasted = PyDict::new_bound(py);
    for (item, count) in &report.wasted_by_item {
        wasted.set_item(item.name(), count)?;
    }
    dict.set_item("wasted_by_item", wasted)?;
    Ok(dict.into())
}

pub fn head_to_head_to_py(py: Python<'_>, report: &HeadToHeadReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("policy_a", &report.policy_a)?;
    dict.set_item("policy_b", &report.policy_b)?;
    dict.set_item("rounds", report.rounds)?;

    let characters = PyDict::new_bound(py);
    for delta in &report.characters {
        characters.set_item(&delta.name, delta.by_week.clone())?;
    }
    dict.set_item("characters", characters)?;
    dict.set_item("week_means", report.week_means.clone())?;
    dict.set_item("overall_mean", report.overall_mean)?;
    Ok(dict.into())
}

pub fn trial_summary_to_py(py: Python<'_>, summary: &TrialSummary) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("policy", &summary.policy)?;
    dict.set_item("seed", summary.seed)?;
    dict.set_item("weeks", summary.weeks)?;
    dict.set_item("party_bis", summary.party_bis)?;
    dict.set_item("bis_by_week", summary.bis_by_week.clone())?;
    dict.set_item("total_wasted", summary.total_wasted())?;

    let characters = PyDict::new_bound(py);
    for progress in &summary.character_bis_by_week {
        characters.set_item(&progress.name, progress.by_week.clone())?;
    }
    dict.set_item("character_bis_by_week", characters)?;
    Ok(dict.into())
}
