//! Build context types for rule execution.

use std::sync::{Mutex, PoisonError};

/// Tracing target used for debug lines emitted on behalf of rules.
pub const LOG_TARGET: &str = "parent_version";

/// Value of a build property that is present.
///
/// Rules only ever look at the [`Display`](std::fmt::Display) form of a
/// value; text is rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Plain text value.
    Text(String),
    /// Integer value.
    Integer(i64),
    /// Boolean value.
    Boolean(bool),
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Failure reported by a [`BuildContext`] when an expression cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to evaluate '{expression}': {message}")]
pub struct EvaluationError {
    /// Expression that failed, e.g. `${project.version}`.
    pub expression: String,
    /// Description of the failure.
    pub message: String,
}

impl EvaluationError {
    /// Creates a new evaluation error.
    #[must_use]
    pub fn new(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            message: message.into(),
        }
    }
}

/// Debug log sink handed to rules by the build context.
pub trait RuleLog: Send + Sync {
    /// Emits a debug-level message.
    fn debug(&self, message: &str);
}

/// Log sink forwarding to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl RuleLog for TracingLog {
    fn debug(&self, message: &str) {
        tracing::debug!(target: LOG_TARGET, "{message}");
    }
}

/// Log sink that keeps every message in emission order.
///
/// Useful for hosts that want to surface the rule's reasoning, and for tests.
#[derive(Debug, Default)]
pub struct RecordingLog {
    messages: Mutex<Vec<String>>,
}

impl RecordingLog {
    /// Creates an empty recording log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true if `message` was recorded verbatim.
    #[must_use]
    pub fn contains(&self, message: &str) -> bool {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|m| m == message)
    }

    /// Returns all recorded messages joined by newlines.
    #[must_use]
    pub fn transcript(&self) -> String {
        self.messages().join("\n")
    }
}

impl RuleLog for RecordingLog {
    fn debug(&self, message: &str) {
        tracing::debug!(target: LOG_TARGET, "{message}");
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Access to the build that a rule runs against.
///
/// Implemented by the host build tool. Rules never cache what they read
/// through it.
pub trait BuildContext {
    /// Evaluates a property expression of the form `${dotted.name}`.
    ///
    /// Returns `Ok(None)` when the property is not defined.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] when the expression cannot be evaluated.
    fn evaluate(&self, expression: &str) -> Result<Option<PropertyValue>, EvaluationError>;

    /// Returns the debug log sink for this build.
    fn log(&self) -> &dyn RuleLog {
        &TracingLog
    }
}

/// Reads the named property, falling back to `default` when it is not defined.
///
/// Both outcomes are reported as a debug line on the context's log.
///
/// # Errors
///
/// Propagates the context's [`EvaluationError`] unchanged.
pub fn resolve_property(
    ctx: &dyn BuildContext,
    name: &str,
    default: &str,
) -> Result<String, EvaluationError> {
    match ctx.evaluate(&format!("${{{name}}}"))? {
        Some(value) => {
            let value = value.to_string();
            ctx.log().debug(&format!("property '{name}='{value}'"));
            Ok(value)
        }
        None => {
            ctx.log().debug(&format!(
                "property '{name}' not found; using default value '{default}'"
            ));
            Ok(default.to_string())
        }
    }
}
