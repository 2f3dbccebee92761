use crate::Result;
use ohno::IntoAppError;
use regex::Regex;
use serde_json::Value;

/// Include pattern that matches every path.
pub const DEFAULT_INCLUDE: &str = "";

/// Exclude pattern that matches no non-empty path.
pub const DEFAULT_EXCLUDE: &str = "^$";

/// Inclusion policy applied to every leaf found while flattening.
#[derive(Debug, Clone)]
pub struct MetricFilter {
    include: Regex,
    exclude: Regex,
}

impl MetricFilter {
    /// Compile the include and exclude expressions.
    ///
    /// # Errors
    ///
    /// Returns an error naming the expression that fails to compile
    pub fn new(include: &str, exclude: &str) -> Result<Self> {
        Ok(Self {
            include: Regex::new(include).into_app_err_with(|| format!("include expression '{include}' is invalid"))?,
            exclude: Regex::new(exclude).into_app_err_with(|| format!("exclude expression '{exclude}' is invalid"))?,
        })
    }

    /// Whether a path is admitted: it must match the include pattern and not the exclude pattern.
    #[must_use]
    pub fn admits(&self, path: &str) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }

    /// The value to record for a leaf, if any.
    ///
    /// Strings and booleans are dropped even when their path is admitted.
    #[must_use]
    pub fn output_metric(&self, path: &str, value: &Value) -> Option<f64> {
        if !self.admits(path) {
            return None;
        }

        match value {
            Value::Number(n) => n.as_f64(),
            Value::Null | Value::Bool(_) | Value::String(_) | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

#[cfg(test)]
impl Default for MetricFilter {
    fn default() -> Self {
        Self::new(DEFAULT_INCLUDE, DEFAULT_EXCLUDE).expect("default filter expressions are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_filter_admits_everything() {
        let filter = MetricFilter::default();
        assert!(filter.admits("custom.a"));
        assert!(filter.admits("x"));
    }

    #[test]
    fn test_output_metric_number() {
        let filter = MetricFilter::default();
        assert_eq!(filter.output_metric("hoge.fuga.foo", &json!(12345.67)), Some(12345.67));
        assert_eq!(filter.output_metric("hoge.fuga.foo", &json!(42)), Some(42.0));
        assert_eq!(filter.output_metric("hoge.fuga.foo", &json!(-3)), Some(-3.0));
    }

    #[test]
    fn test_output_metric_non_numeric() {
        let filter = MetricFilter::default();
        assert_eq!(filter.output_metric("hoge.fuga.foo", &json!("boo")), None);
        assert_eq!(filter.output_metric("hoge.fuga.foo", &json!(true)), None);
        assert_eq!(filter.output_metric("hoge.fuga.foo", &Value::Null), None);
    }

    #[test]
    fn test_output_metric_excluded() {
        let filter = MetricFilter::new(DEFAULT_INCLUDE, "h??e").unwrap();
        assert_eq!(filter.output_metric("hoge.fuga.foo", &json!(12345.67)), None);
    }

    #[test]
    fn test_output_metric_not_included() {
        let filter = MetricFilter::new(r"\.requests$", DEFAULT_EXCLUDE).unwrap();
        assert_eq!(filter.output_metric("custom.requests", &json!(1)), Some(1.0));
        assert_eq!(filter.output_metric("custom.errors", &json!(1)), None);
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let filter = MetricFilter::new("custom", "secret").unwrap();
        assert!(filter.admits("custom.public"));
        assert!(!filter.admits("custom.secret"));
    }

    #[test]
    fn test_invalid_include() {
        let err = MetricFilter::new("(", DEFAULT_EXCLUDE).unwrap_err();
        assert!(err.to_string().contains("include expression"));
    }

    #[test]
    fn test_invalid_exclude() {
        let err = MetricFilter::new(DEFAULT_INCLUDE, "[").unwrap_err();
        assert!(err.to_string().contains("exclude expression"));
    }
}
