//! Pattern rule table
//!
//! Externally supplied (name-pattern, decision) entries consulted when no
//! marker is present. Exact matches win over wildcards; among wildcards
//! the first declared match wins. Matching is ordinal (byte-exact), never
//! locale-aware, and only trailing wildcards are supported.

use intercept_common::{InterceptError, InterceptResult, InterceptionDecision};
use std::collections::HashMap;

/// Wildcard marker character
const WILDCARD: char = '*';

/// A validated name pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Matches one fully-qualified type name exactly
    Exact(String),
    /// Matches any name starting with the stem (trailing `*` stripped)
    Prefix(String),
}

impl Pattern {
    /// Parse and validate a raw pattern string
    ///
    /// Validation happens here, at the boundary: empty patterns and
    /// non-trailing wildcards never reach the table.
    pub fn parse(raw: &str) -> InterceptResult<Self> {
        if raw.is_empty() {
            return Err(InterceptError::InvalidPattern("empty pattern".into()));
        }
        match raw.find(WILDCARD) {
            None => Ok(Self::Exact(raw.to_string())),
            Some(pos) if pos == raw.len() - WILDCARD.len_utf8() => {
                Ok(Self::Prefix(raw[..pos].to_string()))
            }
            Some(_) => Err(InterceptError::InvalidPattern(format!(
                "wildcard must be trailing: {raw}"
            ))),
        }
    }

    /// Ordinal match against a fully-qualified type name
    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => name == exact,
            Self::Prefix(stem) => name.starts_with(stem.as_str()),
        }
    }
}

/// One configuration rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// The validated name pattern
    pub pattern: Pattern,
    /// Decision applied when the pattern matches
    pub decision: InterceptionDecision,
}

impl PatternRule {
    /// Rule from an already-validated pattern
    pub fn new(pattern: Pattern, decision: InterceptionDecision) -> Self {
        Self { pattern, decision }
    }

    /// Rule from a raw pattern string
    pub fn parse(raw: &str, decision: InterceptionDecision) -> InterceptResult<Self> {
        Ok(Self::new(Pattern::parse(raw)?, decision))
    }
}

/// Read-only rule table with exact-first lookup
///
/// Built once from the host's ordered rule list; the engine never mutates
/// it. Exact patterns live in a hash map (first occurrence wins), wildcard
/// stems stay in declaration order for the first-match-wins scan.
#[derive(Debug, Default)]
pub struct RuleTable {
    exact: HashMap<String, InterceptionDecision>,
    wildcards: Vec<(String, InterceptionDecision)>,
}

impl RuleTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from rules in declaration order
    pub fn from_rules(rules: Vec<PatternRule>) -> Self {
        let mut table = Self::new();
        for rule in rules {
            match rule.pattern {
                Pattern::Exact(name) => {
                    table.exact.entry(name).or_insert(rule.decision);
                }
                Pattern::Prefix(stem) => {
                    table.wildcards.push((stem, rule.decision));
                }
            }
        }
        table
    }

    /// Look up the decision for a fully-qualified type name
    ///
    /// Exact match first; otherwise the first wildcard whose stem is a
    /// prefix of the name. First match wins, NOT longest prefix - hosts
    /// needing longest-prefix semantics must order their rules that way.
    pub fn lookup(&self, type_name: &str) -> Option<&InterceptionDecision> {
        if let Some(decision) = self.exact.get(type_name) {
            return Some(decision);
        }
        self.wildcards
            .iter()
            .find(|(stem, _)| type_name.starts_with(stem.as_str()))
            .map(|(_, decision)| decision)
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.exact.len() + self.wildcards.len()
    }

    /// No rules configured
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.wildcards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intercept_common::{Behavior, Severity};

    fn decision(behavior: Behavior) -> InterceptionDecision {
        InterceptionDecision::new(behavior)
    }

    #[test]
    fn test_pattern_parse() {
        assert_eq!(
            Pattern::parse("Billing.Service").unwrap(),
            Pattern::Exact("Billing.Service".into())
        );
        assert_eq!(
            Pattern::parse("Billing.*").unwrap(),
            Pattern::Prefix("Billing.".into())
        );
        assert!(Pattern::parse("").is_err());
        assert!(Pattern::parse("Billing.*.Service").is_err());
        assert!(Pattern::parse("*Billing").is_err());
    }

    #[test]
    fn test_bare_wildcard_matches_everything() {
        let pattern = Pattern::parse("*").unwrap();
        assert!(pattern.matches("Billing.Service"));
        assert!(pattern.matches(""));
    }

    #[test]
    fn test_exact_beats_wildcard() {
        let table = RuleTable::from_rules(vec![
            PatternRule::parse("Billing.*", decision(Behavior::CaptureOutput)).unwrap(),
            PatternRule::parse("Billing.Service", decision(Behavior::CaptureInput)).unwrap(),
        ]);

        let hit = table.lookup("Billing.Service").unwrap();
        assert_eq!(hit.behavior, Behavior::CaptureInput);
    }

    #[test]
    fn test_first_wildcard_wins() {
        let table = RuleTable::from_rules(vec![
            PatternRule::parse(
                "Billing.*",
                decision(Behavior::CaptureInput).with_level(Severity::Debug),
            )
            .unwrap(),
            PatternRule::parse(
                "Billing.Orders.*",
                decision(Behavior::CaptureBoth).with_level(Severity::Trace),
            )
            .unwrap(),
        ]);

        // Both stems match; declaration order decides, not prefix length
        let hit = table.lookup("Billing.Orders.Service").unwrap();
        assert_eq!(hit.behavior, Behavior::CaptureInput);
        assert_eq!(hit.level, Severity::Debug);
    }

    #[test]
    fn test_duplicate_exact_first_wins() {
        let table = RuleTable::from_rules(vec![
            PatternRule::parse("Billing.Service", decision(Behavior::CaptureInput)).unwrap(),
            PatternRule::parse("Billing.Service", decision(Behavior::CaptureBoth)).unwrap(),
        ]);

        assert_eq!(
            table.lookup("Billing.Service").unwrap().behavior,
            Behavior::CaptureInput
        );
    }

    #[test]
    fn test_no_match() {
        let table = RuleTable::from_rules(vec![PatternRule::parse(
            "Billing.*",
            decision(Behavior::CaptureInput),
        )
        .unwrap()]);

        assert!(table.lookup("Orders.Service").is_none());
        // The stem is "Billing." - the bare type name "Billing" is not a match
        assert!(table.lookup("Billing").is_none());
    }

    #[test]
    fn test_matching_is_byte_exact() {
        let table = RuleTable::from_rules(vec![PatternRule::parse(
            "billing.*",
            decision(Behavior::CaptureInput),
        )
        .unwrap()]);

        assert!(table.lookup("Billing.Service").is_none());
    }
}
