//! Decision types for method interception
//!
//! A resolved decision is produced once per method and read on every
//! intercepted call, so it must be cheap to clone (reference-count bump,
//! no allocation).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Log severity
///
/// Variant order is the verbosity order: numerically lower means more
/// verbose. The marker merge rule relies on this (it takes the minimum of
/// two configured severities).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    /// Finest-grained detail
    Trace = 0,
    /// Diagnostic detail
    Debug = 1,
    /// Normal completion
    Info = 2,
    /// Unusual but recoverable
    Warn = 3,
    /// Failure
    Error = 4,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Which parts of a call are captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Behavior {
    /// Observe the call without capturing payloads
    None = 0,
    /// Capture arguments only
    CaptureInput = 1,
    /// Capture the return value only
    CaptureOutput = 2,
    /// Capture arguments and return value
    CaptureBoth = 3,
}

impl Behavior {
    /// Combine two behaviors declared on the same method
    ///
    /// Input + output yields both; both absorbs everything.
    #[inline]
    pub fn combine(self, other: Behavior) -> Behavior {
        use Behavior::*;
        match (self, other) {
            (None, b) | (b, None) => b,
            (CaptureBoth, _) | (_, CaptureBoth) => CaptureBoth,
            (CaptureInput, CaptureOutput) | (CaptureOutput, CaptureInput) => CaptureBoth,
            (a, _) => a,
        }
    }
}

/// Resolved interception outcome for a method
///
/// Immutable once produced by the resolver; an updated policy is expressed
/// as a new value, never an in-place change. `Clone` only bumps the target
/// sink's reference count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptionDecision {
    /// What to capture
    pub behavior: Behavior,
    /// Severity on normal completion
    pub level: Severity,
    /// Severity when the call fails
    pub exception_level: Severity,
    /// Named sink, `None` = default sink
    pub target: Option<Arc<str>>,
}

impl InterceptionDecision {
    /// Decision with the given behavior and all defaults
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            level: Severity::Info,
            exception_level: Severity::Error,
            target: None,
        }
    }

    /// Override the normal-completion severity
    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    /// Override the failure severity
    pub fn with_exception_level(mut self, level: Severity) -> Self {
        self.exception_level = level;
        self
    }

    /// Route records to a named sink
    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(Arc::from(target));
        self
    }
}

impl Default for InterceptionDecision {
    fn default() -> Self {
        Self::new(Behavior::CaptureInput)
    }
}
