//! Marker inspection
//!
//! Turns the marker sets attached to a method and its declaring type into
//! a candidate decision. Pure function of the metadata; precedence is
//! method-level disable > type-level disable > method-level enable >
//! type-level enable > no marker.

use intercept_common::{
    Behavior, InterceptionDecision, InterceptionMarker, MarkerKind, MethodMeta, Severity, TypeMeta,
};

/// What the markers on a method say
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerOutcome {
    /// An explicit disable marker is present
    Disabled,
    /// Enable markers merged into a decision
    Decision(InterceptionDecision),
    /// No marker found; fall through to configuration
    NoMarker,
}

/// Inspect a method's markers, falling back to its declaring type's
pub fn inspect(ty: &TypeMeta, method: &MethodMeta) -> MarkerOutcome {
    if has_disable(method.markers()) || has_disable(ty.markers()) {
        return MarkerOutcome::Disabled;
    }
    if let Some(decision) = merge_enable(method.markers()) {
        return MarkerOutcome::Decision(decision);
    }
    if let Some(decision) = merge_enable(ty.markers()) {
        return MarkerOutcome::Decision(decision);
    }
    MarkerOutcome::NoMarker
}

#[inline]
fn has_disable(markers: &[InterceptionMarker]) -> bool {
    markers.iter().any(InterceptionMarker::is_disable)
}

/// Merge the enable markers declared at one level into a single decision
///
/// Co-occurring capture-input and capture-output become capture-both. The
/// normal severity is the minimum (most verbose) of the explicitly
/// configured ones; failure severity and target take the first explicitly
/// configured value. Unset fields get the engine defaults.
fn merge_enable(markers: &[InterceptionMarker]) -> Option<InterceptionDecision> {
    let mut behavior = None;
    let mut level: Option<Severity> = None;
    let mut exception_level: Option<Severity> = None;
    let mut target = None;

    for marker in markers {
        let kind = match marker.kind() {
            MarkerKind::CaptureInput => Behavior::CaptureInput,
            MarkerKind::CaptureOutput => Behavior::CaptureOutput,
            MarkerKind::CaptureBoth => Behavior::CaptureBoth,
            MarkerKind::Disabled => continue,
        };
        behavior = Some(match behavior {
            Some(b) => kind.combine(b),
            None => kind,
        });

        if let Some(l) = marker.level() {
            level = Some(match level {
                Some(existing) => existing.min(l),
                None => l,
            });
        }
        if exception_level.is_none() {
            exception_level = marker.exception_level();
        }
        if target.is_none() {
            target = marker.target().cloned();
        }
    }

    behavior.map(|b| InterceptionDecision {
        behavior: b,
        level: level.unwrap_or(Severity::Info),
        exception_level: exception_level.unwrap_or(Severity::Error),
        target,
    })
}
