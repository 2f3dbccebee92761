//! Flattening of JSON documents into metrics, and counter-to-rate conversion
//!
//! This module turns an arbitrarily nested JSON document into a flat map from dotted
//! metric path to numeric value, and optionally rewrites selected cumulative counters
//! into per-minute rates.
//!
//! # Implementation Model
//!
//! - [`flatten`] walks a [`serde_json::Value`] recursively. Object keys and array indices
//!   become path segments joined with `.`; every path starts with the configured prefix.
//!   Only numeric leaves survive, and only when the [`MetricFilter`] admits their path.
//! - [`calc_diff`] compares the flattened map against the previous run's
//!   [`Snapshot`](crate::snapshot::Snapshot), replaces counters matching the diff pattern
//!   with their per-minute rate, and persists the current raw values for the next run.
//!
//! Both operations take precompiled [`regex::Regex`] patterns so nothing is compiled
//! per leaf.

mod filter;
mod flatten;
mod rate;

pub use filter::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE, MetricFilter};
pub use flatten::flatten;
pub use rate::calc_diff;

use std::collections::BTreeMap;

/// Flat mapping from dotted metric path to value.
///
/// Ordered so output is stable from run to run.
pub type FlatMetrics = BTreeMap<String, f64>;
