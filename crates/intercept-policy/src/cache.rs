//! Decision storage
//!
//! Per-type entries are built off to the side and installed with a single
//! map insert, so readers either see the previous complete entry or the
//! new complete entry, never a partially populated one. Installed entries
//! are immutable; repopulating a type replaces the whole entry.

use crate::dispatch::{identity_of, is_eligible};
use crate::resolver::DecisionResolver;
use dashmap::DashMap;
use intercept_common::{InterceptionDecision, MarkerKind, MethodIdentity, TypeMeta};
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable per-type decision map
///
/// `None` against an identity means "do not intercept". A missing identity
/// (ineligible or unknown method) reads the same way.
#[derive(Debug)]
pub struct TypeEntry {
    disabled: bool,
    decisions: HashMap<MethodIdentity, Option<InterceptionDecision>>,
}

impl TypeEntry {
    /// Run the resolver over every eligible method of a type
    pub fn build(meta: &TypeMeta, resolver: &DecisionResolver) -> Self {
        let disabled = meta
            .markers()
            .iter()
            .any(|m| m.kind() == MarkerKind::Disabled);

        let mut decisions = HashMap::new();
        for method in meta.methods().iter().filter(|m| is_eligible(m)) {
            decisions.insert(identity_of(meta, method), resolver.resolve(meta, method));
        }

        Self { disabled, decisions }
    }

    /// Type-level disable short-circuit
    #[inline(always)]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Stored decision for an identity
    ///
    /// Single keyed read; the clone is reference-count bumps only. This is
    /// the hot call path.
    #[inline(always)]
    pub fn decision(&self, id: &MethodIdentity) -> Option<InterceptionDecision> {
        self.decisions.get(id).and_then(Clone::clone)
    }

    /// Number of eligible methods in the entry
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// No eligible methods
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

/// Concurrent store of installed entries plus the interface index
///
/// The only mutable shared state in the engine. Written during the
/// registration phase, read continuously afterwards from many threads.
#[derive(Debug, Default)]
pub struct DecisionStore {
    types: DashMap<Arc<str>, Arc<TypeEntry>>,
    implementors: DashMap<Arc<str>, Vec<Arc<str>>>,
}

impl DecisionStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Install (or replace) a type's entry in one atomic step
    pub fn install(&self, type_name: Arc<str>, entry: Arc<TypeEntry>) {
        self.types.insert(type_name, entry);
    }

    /// Record a concrete type under an interface it implements
    pub fn index_implementor(&self, interface: Arc<str>, concrete: Arc<str>) {
        let mut list = self.implementors.entry(interface).or_default();
        if !list.iter().any(|name| name == &concrete) {
            list.push(concrete);
        }
    }

    /// Installed entry for a type, if registered
    #[inline(always)]
    pub fn entry(&self, type_name: &str) -> Option<Arc<TypeEntry>> {
        self.types.get(type_name).map(|e| Arc::clone(e.value()))
    }

    /// Registered concrete types implementing an interface, in
    /// registration order
    pub fn implementors(&self, interface: &str) -> Vec<Arc<str>> {
        self.implementors
            .get(interface)
            .map(|list| list.value().clone())
            .unwrap_or_default()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Nothing registered yet
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleTable;
    use intercept_common::{Behavior, InterceptionMarker, MethodMeta, Severity};

    fn resolver() -> DecisionResolver {
        DecisionResolver::new(RuleTable::new(), false)
    }

    #[test]
    fn test_entry_build_filters_eligibility() {
        let meta = TypeMeta::concrete("OrderService")
            .with_marker(InterceptionMarker::capture_input())
            .with_method(MethodMeta::new("Create", &["Req"]))
            .with_method(MethodMeta::new("internal_sync", &[]).non_public())
            .with_method(MethodMeta::new("ToString", &[]).from_base_type());

        let entry = TypeEntry::build(&meta, &resolver());
        assert_eq!(entry.len(), 1);

        let id = MethodIdentity::new("OrderService", "Create", &["Req"]);
        let decision = entry.decision(&id).unwrap();
        assert_eq!(decision.behavior, Behavior::CaptureInput);

        // Ineligible methods read as "do not intercept"
        let hidden = MethodIdentity::new("OrderService", "internal_sync", &[]);
        assert!(entry.decision(&hidden).is_none());
    }

    #[test]
    fn test_entry_disabled_flag() {
        let meta = TypeMeta::concrete("OrderService")
            .with_marker(InterceptionMarker::disabled())
            .with_method(MethodMeta::new("Create", &["Req"]));

        let entry = TypeEntry::build(&meta, &resolver());
        assert!(entry.is_disabled());
    }

    #[test]
    fn test_entry_overloads_resolve_independently() {
        let meta = TypeMeta::concrete("OrderService")
            .with_method(
                MethodMeta::new("Cancel", &["Guid"])
                    .with_marker(InterceptionMarker::capture_both().with_level(Severity::Warn)),
            )
            .with_method(MethodMeta::new("Cancel", &["String"]));

        let entry = TypeEntry::build(&meta, &resolver());
        assert_eq!(entry.len(), 2);

        let by_guid = MethodIdentity::new("OrderService", "Cancel", &["Guid"]);
        let by_string = MethodIdentity::new("OrderService", "Cancel", &["String"]);

        assert_eq!(
            entry.decision(&by_guid).unwrap().behavior,
            Behavior::CaptureBoth
        );
        assert!(entry.decision(&by_string).is_none());
    }

    #[test]
    fn test_store_install_replaces() {
        let store = DecisionStore::new();
        let meta = TypeMeta::concrete("OrderService").with_method(MethodMeta::new("A", &[]));
        let name: Arc<str> = Arc::from("OrderService");

        store.install(Arc::clone(&name), Arc::new(TypeEntry::build(&meta, &resolver())));
        let richer = TypeMeta::concrete("OrderService")
            .with_method(MethodMeta::new("A", &[]))
            .with_method(MethodMeta::new("B", &[]));
        store.install(Arc::clone(&name), Arc::new(TypeEntry::build(&richer, &resolver())));

        assert_eq!(store.len(), 1);
        assert_eq!(store.entry("OrderService").unwrap().len(), 2);
    }

    #[test]
    fn test_implementor_index_dedupes() {
        let store = DecisionStore::new();
        let iface: Arc<str> = Arc::from("IOrderService");
        let concrete: Arc<str> = Arc::from("OrderService");

        store.index_implementor(Arc::clone(&iface), Arc::clone(&concrete));
        store.index_implementor(Arc::clone(&iface), Arc::clone(&concrete));
        store.index_implementor(iface, Arc::from("BackupOrderService"));

        let impls = store.implementors("IOrderService");
        assert_eq!(impls.len(), 2);
        assert_eq!(impls[0].as_ref(), "OrderService");
    }
}
