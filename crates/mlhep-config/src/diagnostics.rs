//! Advisory notices and rendered diagnostics.
//!
//! A validation run yields a list of [`Notice`]s next to either the completed
//! configuration or a single [`ValidationError`]. Nothing here prints; the
//! embedding caller decides how to surface them.

use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;
use crate::value::{display_value, ParamValue};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Purely advisory, never interrupts a run.
    Info,
    /// Fatal to the current validation run.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A non-fatal event raised while completing a configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A parameter was absent and took its schema default.
    DefaultApplied {
        /// Parameter that was filled.
        parameter: String,
        /// Default value used.
        value: ParamValue,
    },

    /// A dependency rule overwrote a parameter.
    DependencyEnforced {
        /// Parameter that was overwritten.
        parameter: String,
        /// Value it was forced to.
        value: ParamValue,
        /// Parameter whose value triggered the rule.
        trigger: String,
        /// Value of the triggering parameter.
        trigger_value: ParamValue,
    },
}

impl Notice {
    /// Returns the parameter the notice is about.
    pub fn parameter(&self) -> &str {
        match self {
            Self::DefaultApplied { parameter, .. } | Self::DependencyEnforced { parameter, .. } => {
                parameter
            }
        }
    }

    /// Returns the value the parameter ended up with.
    pub fn value(&self) -> &ParamValue {
        match self {
            Self::DefaultApplied { value, .. } | Self::DependencyEnforced { value, .. } => value,
        }
    }

    /// Notices are always informational.
    pub fn severity(&self) -> Severity {
        Severity::Info
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultApplied { parameter, value } => write!(
                f,
                "Use default value {} for parameter {}",
                display_value(value),
                parameter
            ),
            Self::DependencyEnforced {
                parameter,
                value,
                trigger,
                trigger_value,
            } => write!(
                f,
                "Parameter {} = {} enforced since it is required for {} == {}",
                parameter,
                display_value(value),
                trigger,
                display_value(trigger_value)
            ),
        }
    }
}

/// A notice or error flattened to severity, parameter and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Parameter concerned.
    pub parameter: String,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

impl From<&Notice> for Diagnostic {
    fn from(notice: &Notice) -> Self {
        Self {
            severity: notice.severity(),
            parameter: notice.parameter().to_string(),
            message: notice.to_string(),
        }
    }
}

impl From<&ValidationError> for Diagnostic {
    fn from(err: &ValidationError) -> Self {
        Self {
            severity: err.severity(),
            parameter: err.key().to_string(),
            message: err.to_string(),
        }
    }
}
