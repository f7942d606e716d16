//! Structured error types shared across the reinterpretation crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`ReintError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (masses, benchmark names, indices).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the reinterpretation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ReintError {
    /// Input arrays or configuration violate the data model.
    #[error("malformed input: {0}")]
    MalformedInput(ErrorInfo),
    /// Requested benchmark is not registered.
    #[error("unknown benchmark: {0}")]
    UnknownBenchmark(ErrorInfo),
    /// Benchmark does not satisfy the preconditions of the requested mapping.
    #[error("incompatible benchmark: {0}")]
    IncompatibleBenchmark(ErrorInfo),
    /// No coupling inside the configured range reproduces the exclusion depth.
    #[error("rescale failure: {0}")]
    RescaleFailure(ErrorInfo),
    /// The oracle produced a non-finite or negative prediction.
    #[error("numeric divergence: {0}")]
    NumericDivergence(ErrorInfo),
    /// The oracle rejected the query.
    #[error("oracle error: {0}")]
    Oracle(ErrorInfo),
    /// Nothing is left to report after dropping unresolved points.
    #[error("empty result: {0}")]
    EmptyResult(ErrorInfo),
    /// The run was cancelled between mass points.
    #[error("cancelled: {0}")]
    Cancelled(ErrorInfo),
    /// Filesystem errors raised at the load/store boundary.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization errors raised while encoding artefacts.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl ReintError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ReintError::MalformedInput(info)
            | ReintError::UnknownBenchmark(info)
            | ReintError::IncompatibleBenchmark(info)
            | ReintError::RescaleFailure(info)
            | ReintError::NumericDivergence(info)
            | ReintError::Oracle(info)
            | ReintError::EmptyResult(info)
            | ReintError::Cancelled(info)
            | ReintError::Io(info)
            | ReintError::Serde(info) => info,
        }
    }

    /// Whether the error only invalidates a single mass point.
    ///
    /// Recoverable errors mark the point unresolved and the run continues;
    /// every other family aborts the run before output is written.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReintError::RescaleFailure(_) | ReintError::NumericDivergence(_) | ReintError::Oracle(_)
        )
    }

    /// Shorthand for a [`ReintError::MalformedInput`] without context.
    pub fn malformed(code: &str, message: impl Into<String>) -> Self {
        ReintError::MalformedInput(ErrorInfo::new(code, message.into()))
    }
}
