//! In-memory build context backed by a static property table.

use crate::context::{BuildContext, EvaluationError, PropertyValue, RuleLog, TracingLog};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// A [`BuildContext`] that answers from a fixed table of properties.
///
/// Properties are keyed by their dotted name (`project.version`). Every
/// evaluated expression is recorded, so callers can tell which properties a
/// rule actually consulted.
///
/// # Example
///
/// ```ignore
/// let ctx = PropertyMap::new()
///     .with("project.artifact.groupId", "com.example")
///     .with("project.artifact.artifactId", "widget")
///     .with("project.version", "1.0.0");
/// ```
pub struct PropertyMap {
    values: BTreeMap<String, PropertyValue>,
    failures: BTreeMap<String, String>,
    log: Arc<dyn RuleLog>,
    evaluated: Mutex<Vec<String>>,
}

impl Default for PropertyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PropertyMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyMap")
            .field("values", &self.values)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}

impl PropertyMap {
    /// Creates an empty property map logging through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            failures: BTreeMap::new(),
            log: Arc::new(TracingLog),
            evaluated: Mutex::new(Vec::new()),
        }
    }

    /// Defines a property.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Defines a property only when `value` is `Some`.
    #[must_use]
    pub fn with_optional(self, name: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }

    /// Makes evaluation of the named property fail with `message`.
    #[must_use]
    pub fn fail_on(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(name.into(), message.into());
        self
    }

    /// Replaces the debug log sink.
    #[must_use]
    pub fn with_log(mut self, log: Arc<dyn RuleLog>) -> Self {
        self.log = log;
        self
    }

    /// Defines or replaces a property.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the value of a property, if defined.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    /// Returns the number of defined properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no properties are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns every expression evaluated so far, in order.
    #[must_use]
    pub fn evaluated(&self) -> Vec<String> {
        self.evaluated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true if the named property was evaluated at least once.
    #[must_use]
    pub fn was_evaluated(&self, name: &str) -> bool {
        let expression = format!("${{{name}}}");
        self.evaluated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|e| *e == expression)
    }

    /// Loads properties from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, PropertyMapError> {
        let content = std::fs::read_to_string(path).map_err(|e| PropertyMapError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses properties from a TOML document.
    ///
    /// Both quoted dotted keys (`"project.version" = "1.0.0"`) and nested
    /// tables (`[project] version = "1.0.0"`) are accepted; nested keys are
    /// joined with `.`. Only strings, integers and booleans are valid values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or holds an unsupported value.
    pub fn parse(content: &str) -> Result<Self, PropertyMapError> {
        let table: toml::Table = content.parse().map_err(|e: toml::de::Error| {
            PropertyMapError::Parse {
                message: e.to_string(),
            }
        })?;

        let mut map = Self::new();
        map.load_table("", &table)?;
        Ok(map)
    }

    fn load_table(&mut self, prefix: &str, table: &toml::Table) -> Result<(), PropertyMapError> {
        for (key, value) in table {
            let name = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };

            match value {
                toml::Value::String(s) => self.insert(name, s.as_str()),
                toml::Value::Integer(i) => self.insert(name, *i),
                toml::Value::Boolean(b) => self.insert(name, *b),
                toml::Value::Table(nested) => self.load_table(&name, nested)?,
                other => {
                    return Err(PropertyMapError::UnsupportedValue {
                        name,
                        kind: other.type_str(),
                    })
                }
            }
        }
        Ok(())
    }
}

impl BuildContext for PropertyMap {
    fn evaluate(&self, expression: &str) -> Result<Option<PropertyValue>, EvaluationError> {
        self.evaluated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(expression.to_string());

        let name = property_name(expression)
            .ok_or_else(|| EvaluationError::new(expression, "malformed property expression"))?;

        if let Some(message) = self.failures.get(name) {
            return Err(EvaluationError::new(expression, message.clone()));
        }

        Ok(self.values.get(name).cloned())
    }

    fn log(&self) -> &dyn RuleLog {
        &*self.log
    }
}

/// Extracts `name` from `${name}`.
fn property_name(expression: &str) -> Option<&str> {
    expression
        .strip_prefix("${")?
        .strip_suffix('}')
        .filter(|name| !name.is_empty())
}

/// Errors loading a property table.
#[derive(Debug, thiserror::Error)]
pub enum PropertyMapError {
    /// IO error reading the property file.
    #[error("Failed to read property file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The property file is not valid TOML.
    #[error("Failed to parse properties: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A property holds a value that cannot be used as a build property.
    #[error("Property '{name}' has unsupported type {kind}")]
    UnsupportedValue {
        /// Dotted property name.
        name: String,
        /// TOML type name of the offending value.
        kind: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RecordingLog;

    #[test]
    fn evaluates_defined_and_undefined() {
        let ctx = PropertyMap::new().with("project.version", "1.0.0");

        assert_eq!(
            ctx.evaluate("${project.version}").unwrap(),
            Some(PropertyValue::Text("1.0.0".into()))
        );
        assert_eq!(ctx.evaluate("${project.parent.version}").unwrap(), None);
        assert_eq!(
            ctx.evaluated(),
            vec!["${project.version}", "${project.parent.version}"]
        );
        assert!(ctx.was_evaluated("project.version"));
        assert!(!ctx.was_evaluated("project.groupId"));
    }

    #[test]
    fn malformed_expression_is_an_error() {
        let ctx = PropertyMap::new().with("project.version", "1.0.0");

        let err = ctx.evaluate("project.version").unwrap_err();
        assert_eq!(err.message, "malformed property expression");
        assert!(ctx.evaluate("${}").is_err());
    }

    #[test]
    fn fail_on_overrides_value() {
        let ctx = PropertyMap::new()
            .with("project.version", "1.0.0")
            .fail_on("project.version", "x-expression-evaluation-failed-x");

        let err = ctx.evaluate("${project.version}").unwrap_err();
        assert_eq!(
            err,
            EvaluationError::new("${project.version}", "x-expression-evaluation-failed-x")
        );
    }

    #[test]
    fn with_optional_skips_none() {
        let ctx = PropertyMap::new()
            .with_optional("a", Some("1"))
            .with_optional("b", None);
        assert_eq!(ctx.len(), 1);
        assert!(ctx.get("b").is_none());
    }

    #[test]
    fn custom_log_receives_messages() {
        let log = Arc::new(RecordingLog::new());
        let ctx = PropertyMap::new().with_log(log.clone());

        ctx.log().debug("one");
        assert_eq!(log.messages(), vec!["one"]);
    }

    #[test]
    fn parse_flat_and_nested_keys() {
        let toml = r#"
"project.version" = "1.0.0"
"project.artifact.artifactId" = "widget"

[project.parent]
version = "1.0.0"

[build]
number = 42
release = true
"#;

        let ctx = PropertyMap::parse(toml).expect("Failed to parse");
        assert_eq!(ctx.get("project.version"), Some(&PropertyValue::from("1.0.0")));
        assert_eq!(ctx.get("project.artifact.artifactId"), Some(&PropertyValue::from("widget")));
        assert_eq!(ctx.get("project.parent.version"), Some(&PropertyValue::from("1.0.0")));
        assert_eq!(ctx.get("build.number"), Some(&PropertyValue::Integer(42)));
        assert_eq!(ctx.get("build.release"), Some(&PropertyValue::Boolean(true)));
    }

    #[test]
    fn parse_rejects_unsupported_values() {
        let err = PropertyMap::parse(r#""project.modules" = ["a", "b"]"#).unwrap_err();
        assert!(matches!(
            err,
            PropertyMapError::UnsupportedValue { ref name, kind: "array" } if name == "project.modules"
        ));
    }

    #[test]
    fn parse_rejects_invalid_toml() {
        assert!(matches!(
            PropertyMap::parse("not = = toml"),
            Err(PropertyMapError::Parse { .. })
        ));
    }
}
