//! Output formatting
//!
//! The only format is the tab-separated line protocol read by the monitoring agent:
//! one `<path>\t<value>\t<timestamp>` line per metric.

mod tsv;

pub use tsv::generate as generate_tsv;
