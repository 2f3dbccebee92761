use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs;

/// Settings read from an optional TOML file.
///
/// Every field is optional; values given on the command line take precedence.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Prefix for metric names
    pub prefix: Option<String>,

    /// Only output metrics whose path matches this expression
    pub include: Option<String>,

    /// Do not output metrics whose path matches this expression
    pub exclude: Option<String>,

    /// Convert metrics whose path matches this expression into per-minute rates
    pub diff: Option<String>,

    /// Skip TLS certificate verification
    pub insecure: Option<bool>,

    /// Directory holding snapshot files
    pub work_dir: Option<Utf8PathBuf>,
}

impl Config {
    /// Load configuration from a file, or use defaults when no file is given
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self> {
        let Some(path) = config_path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
        toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{path}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, text: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("json-metrics.toml")).unwrap();
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_no_file_is_default() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
prefix = "jolokia"
include = "Heap"
exclude = "max$"
diff = "count"
insecure = true
work_dir = "/var/tmp/metrics"
"#,
        );

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.prefix.as_deref(), Some("jolokia"));
        assert_eq!(config.include.as_deref(), Some("Heap"));
        assert_eq!(config.exclude.as_deref(), Some("max$"));
        assert_eq!(config.diff.as_deref(), Some("count"));
        assert_eq!(config.insecure, Some(true));
        assert_eq!(config.work_dir, Some(Utf8PathBuf::from("/var/tmp/metrics")));
    }

    #[test]
    fn test_load_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "prefix = \"svc\"\n");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.prefix.as_deref(), Some("svc"));
        assert_eq!(config.diff, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "url = \"http://localhost/\"\n");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("parsing configuration file"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Some(Utf8Path::new("/nonexistent/json-metrics.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading configuration file"));
    }
}
