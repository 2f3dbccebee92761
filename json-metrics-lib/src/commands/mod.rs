//! Command-line interface and orchestration for json-metrics
//!
//! # Execution Flow
//!
//! The `run` function parses command-line arguments using clap and then performs a
//! single pass:
//!
//! 1. Resolve arguments and the optional config file into settings (`common`)
//! 2. Fetch the JSON document from the selected source
//! 3. Flatten it into metric paths
//! 4. When a diff expression is configured, convert matching counters into rates
//! 5. Print one tab-separated line per metric
//!
//! Configuration problems are reported on the host's error stream and terminate the
//! process with status 1 before anything is fetched.

mod common;
mod config;
mod host;
mod run;

pub use common::{Common, CommonArgs};
pub use host::Host;
pub use run::run;
