//! Acquisition of the raw JSON document
//!
//! Exactly one source is used per run: an HTTP GET against a URL, or the whole of
//! standard input. Either way the body is buffered in full and then parsed; nothing
//! is retried.

mod http;

use crate::{Host, Result};
use ohno::{IntoAppError, bail};
use serde_json::Value;
use std::io::Read;

const LOG_TARGET: &str = "    source";

/// Identity used for the snapshot cache key when reading standard input.
pub const STDIN_IDENTITY: &str = "-";

/// Where the JSON document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Stdin,
}

impl Source {
    /// Pick the source from the command-line selection.
    ///
    /// An empty URL counts as absent.
    ///
    /// # Errors
    ///
    /// Returns an error when both sources or neither are selected
    pub fn from_selection(url: Option<&str>, stdin: bool) -> Result<Self> {
        match (url.filter(|u| !u.is_empty()), stdin) {
            (Some(url), false) => Ok(Self::Url(url.to_string())),
            (None, true) => Ok(Self::Stdin),
            (Some(_), true) => bail!("--url and --stdin are exclusive"),
            (None, false) => bail!("--url or --stdin is mandatory"),
        }
    }

    /// Identity of the source, as used in the snapshot cache key.
    #[must_use]
    pub fn identity(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Stdin => STDIN_IDENTITY,
        }
    }

    /// Fetch and parse the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or is not valid JSON
    pub async fn fetch<H: Host>(&self, host: &mut H, insecure: bool) -> Result<Value> {
        let body = match self {
            Self::Url(url) => http::get(url, insecure).await?,
            Self::Stdin => {
                let mut body = Vec::new();
                let _ = host.input().read_to_end(&mut body).into_app_err("unable to read standard input")?;
                body
            }
        };

        log::debug!(target: LOG_TARGET, "Read {} bytes from {}", body.len(), self.identity());

        serde_json::from_slice(&body).into_app_err_with(|| format!("unable to parse JSON from {}", self.identity()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_selection_url() {
        assert_eq!(
            Source::from_selection(Some("http://localhost/stats"), false).unwrap(),
            Source::Url("http://localhost/stats".to_string())
        );
    }

    #[test]
    fn test_from_selection_stdin() {
        assert_eq!(Source::from_selection(None, true).unwrap(), Source::Stdin);
        assert_eq!(Source::from_selection(Some(""), true).unwrap(), Source::Stdin);
    }

    #[test]
    fn test_from_selection_both() {
        let err = Source::from_selection(Some("http://localhost/"), true).unwrap_err();
        assert!(err.to_string().contains("exclusive"));
    }

    #[test]
    fn test_from_selection_neither() {
        let err = Source::from_selection(None, false).unwrap_err();
        assert!(err.to_string().contains("mandatory"));

        let err = Source::from_selection(Some(""), false).unwrap_err();
        assert!(err.to_string().contains("mandatory"));
    }

    #[test]
    fn test_identity() {
        assert_eq!(Source::Url("http://x/".to_string()).identity(), "http://x/");
        assert_eq!(Source::Stdin.identity(), STDIN_IDENTITY);
    }
}
