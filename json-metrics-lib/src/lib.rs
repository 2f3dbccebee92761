#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for json-metrics
//!
//! This library holds all functionality for the json-metrics tool, which fetches a JSON
//! document, flattens it into dotted metric paths, and prints them in the line-oriented
//! format a monitoring agent consumes.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`source`]: Acquisition of the raw JSON document (HTTP or stdin)
//! - [`metrics`]: Flattening, filtering, and counter-to-rate conversion
//! - [`snapshot`]: The persisted previous sample used for rate conversion
//! - [`reports`]: Output formatting

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod metrics;
#[cfg(not(any(debug_assertions, test)))]
mod metrics;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

#[cfg(any(debug_assertions, test))]
pub mod snapshot;
#[cfg(not(any(debug_assertions, test)))]
mod snapshot;

#[cfg(any(debug_assertions, test))]
pub mod source;
#[cfg(not(any(debug_assertions, test)))]
mod source;

pub use crate::commands::{Host, run};
