//! Declarative interception markers
//!
//! A marker is a structural fact about a method or type, authored by the
//! service implementer and attached to the metadata registry. It is plain
//! data; the inspector in `intercept-policy` turns marker sets into
//! decisions.

use crate::decision::Severity;
use std::sync::Arc;

/// What a marker declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Suppress interception for the method (or every method of the type)
    Disabled,
    /// Capture arguments
    CaptureInput,
    /// Capture the return value
    CaptureOutput,
    /// Capture arguments and return value
    CaptureBoth,
}

/// A method- or type-attached statement of interception intent
///
/// Severity, failure severity and target are optional overrides; unset
/// fields fall back to the engine defaults (Info / Error / default sink)
/// when the marker is turned into a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptionMarker {
    kind: MarkerKind,
    level: Option<Severity>,
    exception_level: Option<Severity>,
    target: Option<Arc<str>>,
}

impl InterceptionMarker {
    fn new(kind: MarkerKind) -> Self {
        Self {
            kind,
            level: None,
            exception_level: None,
            target: None,
        }
    }

    /// Disable marker
    pub fn disabled() -> Self {
        Self::new(MarkerKind::Disabled)
    }

    /// Capture-input marker
    pub fn capture_input() -> Self {
        Self::new(MarkerKind::CaptureInput)
    }

    /// Capture-output marker
    pub fn capture_output() -> Self {
        Self::new(MarkerKind::CaptureOutput)
    }

    /// Capture-both marker
    pub fn capture_both() -> Self {
        Self::new(MarkerKind::CaptureBoth)
    }

    /// Override the normal-completion severity
    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    /// Override the failure severity
    pub fn with_exception_level(mut self, level: Severity) -> Self {
        self.exception_level = Some(level);
        self
    }

    /// Route captured records to a named sink
    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(Arc::from(target));
        self
    }

    /// Marker kind
    #[inline]
    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    /// `true` for a disable marker
    #[inline]
    pub fn is_disable(&self) -> bool {
        self.kind == MarkerKind::Disabled
    }

    /// `true` for any enable (capture) marker
    #[inline]
    pub fn is_enable(&self) -> bool {
        self.kind != MarkerKind::Disabled
    }

    /// Configured severity, if any
    #[inline]
    pub fn level(&self) -> Option<Severity> {
        self.level
    }

    /// Configured failure severity, if any
    #[inline]
    pub fn exception_level(&self) -> Option<Severity> {
        self.exception_level
    }

    /// Configured sink name, if any
    #[inline]
    pub fn target(&self) -> Option<&Arc<str>> {
        self.target.as_ref()
    }
}
