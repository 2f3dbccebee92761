use crate::Result;
use crate::metrics::FlatMetrics;
use core::fmt::Write;

/// Write one line per metric, in path order.
///
/// # Errors
///
/// Returns an error if the writer fails
pub fn generate<W: Write>(metrics: &FlatMetrics, timestamp: i64, writer: &mut W) -> Result<()> {
    for (path, value) in metrics {
        writeln!(writer, "{path}\t{value:.6}\t{timestamp}")?;
    }

    Ok(())
}
