//! Argument resolution and process setup shared by every run.

use super::config::Config;
use crate::Result;
use crate::metrics::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE, MetricFilter};
use crate::snapshot::SnapshotStore;
use crate::source::Source;
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use directories::BaseDirs;
use ohno::IntoAppError;
use regex::Regex;
use std::path::PathBuf;

/// Prefix used for metric names when none is configured.
pub const DEFAULT_PREFIX: &str = "custom";

const LOG_TARGET: &str = "    common";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    #[default]
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments controlling a run
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// URL to get a JSON document from
    #[arg(long, value_name = "URL", help_heading = "Source")]
    pub url: Option<String>,

    /// Read the JSON document from standard input
    #[arg(long, help_heading = "Source")]
    pub stdin: bool,

    /// Skip TLS certificate verification
    #[arg(long, help_heading = "Source")]
    pub insecure: bool,

    /// Prefix for metric names [default: custom]
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Output only metrics whose path matches the expression [default: match everything]
    #[arg(long, value_name = "REGEX")]
    pub include: Option<String>,

    /// Exclude metrics whose path matches the expression [default: ^$]
    #[arg(long, value_name = "REGEX")]
    pub exclude: Option<String>,

    /// Report metrics whose path matches the expression as per-minute rates
    #[arg(long, value_name = "REGEX")]
    pub diff: Option<String>,

    /// File holding the previous sample, overriding the one derived from prefix and source
    #[arg(long, value_name = "PATH", help_heading = "State")]
    pub tempfile: Option<Utf8PathBuf>,

    /// Directory where previous samples are kept
    #[arg(long, value_name = "PATH", env = "MACKEREL_PLUGIN_WORKDIR", help_heading = "State")]
    pub work_dir: Option<Utf8PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,
}

/// Fully resolved settings for one run.
#[derive(Debug)]
pub struct Common {
    pub source: Source,
    pub prefix: String,
    pub insecure: bool,
    pub filter: MetricFilter,

    /// Present only when rate conversion is enabled.
    pub diff: Option<Regex>,

    pub store: SnapshotStore,
}

impl Common {
    /// Resolve command-line arguments and the optional config file into run settings
    ///
    /// # Errors
    ///
    /// Returns an error if the source selection is invalid, the config file cannot be
    /// loaded, or any expression fails to compile
    pub fn new(args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let source = Source::from_selection(args.url.as_deref(), args.stdin)?;
        let config = Config::load(args.config.as_deref())?;

        let prefix = args.prefix.clone().or(config.prefix).unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let include = args.include.clone().or(config.include).unwrap_or_else(|| DEFAULT_INCLUDE.to_string());
        let exclude = args.exclude.clone().or(config.exclude).unwrap_or_else(|| DEFAULT_EXCLUDE.to_string());
        let filter = MetricFilter::new(&include, &exclude)?;

        let diff = match args.diff.clone().or(config.diff) {
            Some(expr) if !expr.is_empty() => {
                Some(Regex::new(&expr).into_app_err_with(|| format!("diff expression '{expr}' is invalid"))?)
            }
            _ => None,
        };

        let store = if let Some(path) = &args.tempfile {
            SnapshotStore::new(path.as_std_path())
        } else {
            let work_dir = args
                .work_dir
                .clone()
                .or(config.work_dir)
                .map_or_else(default_work_dir, Utf8PathBuf::into_std_path_buf);
            SnapshotStore::for_source(work_dir, &prefix, source.identity())
        };

        if diff.is_some() {
            log::debug!(target: LOG_TARGET, "Previous samples kept in '{}'", store.path().display());
        }

        Ok(Self {
            source,
            prefix,
            insecure: args.insecure || config.insecure.unwrap_or(false),
            filter,
            diff,
            store,
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        // a second run in the same process keeps the first logger
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .try_init();
    }
}

/// The platform cache directory, or the system temp directory when there is none.
fn default_work_dir() -> PathBuf {
    BaseDirs::new().map_or_else(std::env::temp_dir, |dirs| dirs.cache_dir().join("json-metrics"))
}
