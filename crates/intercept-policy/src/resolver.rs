//! Decision resolution
//!
//! Combines marker inspection, the rule table and the default policy into
//! one decision per method. The precedence is fixed: markers outrank
//! configuration so a service author can always force behavior locally,
//! and configuration outranks the default so operators can turn on broad
//! interception without touching source.

use crate::inspector::{self, MarkerOutcome};
use crate::rules::RuleTable;
use intercept_common::{Behavior, InterceptionDecision, MethodMeta, TypeMeta};

/// Resolves the final decision for a method
///
/// The auto-intercept flag and default decision are explicit construction
/// parameters, never ambient state, so engines with different policies can
/// coexist in one process.
#[derive(Debug)]
pub struct DecisionResolver {
    rules: RuleTable,
    auto_intercept: bool,
    default_decision: InterceptionDecision,
}

impl DecisionResolver {
    /// Resolver with the stock default decision (capture input, Info,
    /// Error, default sink)
    pub fn new(rules: RuleTable, auto_intercept: bool) -> Self {
        Self {
            rules,
            auto_intercept,
            default_decision: InterceptionDecision::new(Behavior::CaptureInput),
        }
    }

    /// Resolver with a custom auto-intercept default decision
    pub fn with_default(
        rules: RuleTable,
        auto_intercept: bool,
        default_decision: InterceptionDecision,
    ) -> Self {
        Self {
            rules,
            auto_intercept,
            default_decision,
        }
    }

    /// Resolve one method; `None` means "do not intercept"
    ///
    /// Precedence: marker disable, marker enable, configuration rule by
    /// owning type name, auto-intercept default. This order must not be
    /// changed.
    pub fn resolve(&self, ty: &TypeMeta, method: &MethodMeta) -> Option<InterceptionDecision> {
        match inspector::inspect(ty, method) {
            MarkerOutcome::Disabled => return None,
            MarkerOutcome::Decision(decision) => return Some(decision),
            MarkerOutcome::NoMarker => {}
        }

        if let Some(decision) = self.rules.lookup(ty.name()) {
            return Some(decision.clone());
        }

        if self.auto_intercept {
            return Some(self.default_decision.clone());
        }
        None
    }

    /// The configured rule table
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Whether unmatched methods get the default decision
    pub fn auto_intercept(&self) -> bool {
        self.auto_intercept
    }
}
