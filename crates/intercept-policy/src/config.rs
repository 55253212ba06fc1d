//! Configuration boundary
//!
//! The host parses whatever file format it uses into these shapes; this
//! module only validates patterns and assembles the resolver. A malformed
//! pattern is rejected here and never reaches the rule table.

use crate::resolver::DecisionResolver;
use crate::rules::{PatternRule, RuleTable};
use intercept_common::{Behavior, InterceptResult, InterceptionDecision, Severity};
use serde::Deserialize;

/// Interception policy configuration, already parsed by the host
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    /// Apply the default decision to methods with no marker and no rule
    #[serde(default)]
    pub auto_intercept: bool,
    /// Ordered rule list; order matters for wildcard matching
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// One configured rule
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Exact fully-qualified type name, or a prefix ending in `*`
    pub pattern: String,
    /// What to capture for matching types
    pub behavior: Behavior,
    /// Severity on normal completion (default info)
    #[serde(default)]
    pub level: Option<Severity>,
    /// Severity on failure (default error)
    #[serde(default)]
    pub exception_level: Option<Severity>,
    /// Named sink (default sink when absent)
    #[serde(default)]
    pub target: Option<String>,
}

impl RuleConfig {
    fn into_rule(self) -> InterceptResult<PatternRule> {
        let mut decision = InterceptionDecision::new(self.behavior);
        if let Some(level) = self.level {
            decision = decision.with_level(level);
        }
        if let Some(level) = self.exception_level {
            decision = decision.with_exception_level(level);
        }
        if let Some(target) = &self.target {
            decision = decision.with_target(target);
        }
        PatternRule::parse(&self.pattern, decision)
    }
}

impl PolicyConfig {
    /// Validate every pattern and build the resolver
    pub fn into_resolver(self) -> InterceptResult<DecisionResolver> {
        let rule_count = self.rules.len();
        let rules = self
            .rules
            .into_iter()
            .map(RuleConfig::into_rule)
            .collect::<InterceptResult<Vec<_>>>()?;

        tracing::info!(
            "interception policy loaded: {} rules, auto_intercept={}",
            rule_count,
            self.auto_intercept
        );
        Ok(DecisionResolver::new(
            RuleTable::from_rules(rules),
            self.auto_intercept,
        ))
    }
}
