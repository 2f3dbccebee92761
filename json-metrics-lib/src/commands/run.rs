//! Command dispatch logic for json-metrics

use super::{Common, CommonArgs};
use crate::metrics::{calc_diff, flatten};
use crate::reports::generate_tsv;
use crate::{Host, Result};
use chrono::Utc;
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use core::slice;
use ohno::IntoAppError;
use std::io::Write;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "json-metrics", version, long_about = None)]
#[command(about = "Flatten a JSON document into tab-separated metrics")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    args: CommonArgs,
}

/// Parse command-line arguments and perform one collection pass
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the configuration is invalid, or if the document cannot be
/// fetched or parsed. Nothing is printed in that case.
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    let common = match Common::new(&cli.args) {
        Ok(common) => common,
        Err(e) => {
            let _ = writeln!(host.error(), "{e}");
            host.exit(1);
            return Err(e);
        }
    };

    let document = common.source.fetch(host, common.insecure).await?;

    let timestamp = Utc::now().timestamp();
    let mut metrics = flatten(&document, slice::from_ref(&common.prefix), &common.filter);

    if let Some(diff) = &common.diff {
        metrics = calc_diff(metrics, timestamp, &common.store, diff);
    }

    let mut output = String::new();
    generate_tsv(&metrics, timestamp, &mut output)?;
    write!(host.output(), "{output}").into_app_err("unable to write output")?;

    Ok(())
}
