//! Error payloads for the checkers and the suite runner.
//!
//! Every failure carries an [`ErrorInfo`] with a short stable code, so a
//! failed verdict can be matched on without parsing its message.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message, and key/value context describing one failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case code such as `not-spd` or `zero-trials`.
    pub code: String,
    /// One-line description.
    pub message: String,
    /// Dimensions, field names, and offending values.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested fix, when one is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key = value`, replacing an earlier value for `key`.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " | context: [{}]", pairs.join(", "))?;
        }
        match &self.hint {
            Some(hint) => write!(f, " | hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Failure raised while building or running a check.
///
/// Checkers never let these escape: they are folded into a failing
/// verdict. Only configuration and report serialization surface them to
/// callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum NdlmError {
    /// Factorisation or inversion of a dense matrix failed.
    #[error("linalg error: {0}")]
    Linalg(ErrorInfo),
    /// A random draw could not be constructed.
    #[error("sampling error: {0}")]
    Sampling(ErrorInfo),
    /// Suite configuration out of range.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// JSON encoding or decoding failed.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl NdlmError {
    /// Payload of any variant.
    pub fn info(&self) -> &ErrorInfo {
        let (Self::Linalg(info) | Self::Sampling(info) | Self::Config(info) | Self::Serde(info)) =
            self;
        info
    }
}
