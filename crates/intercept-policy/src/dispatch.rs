//! Method eligibility, identity computation and interface dispatch
//!
//! Only publicly callable, non-static, regular instance methods are
//! eligible for interception; accessors, constructors and members lifted
//! from the universal base object type are never considered.

use intercept_common::{MethodIdentity, MethodKind, MethodMeta, TypeMeta, Visibility};
use std::sync::Arc;

/// Whether a method can be intercepted at all
///
/// Applied before identity computation, both at registration time and on
/// the on-demand fallback path.
#[inline]
pub fn is_eligible(method: &MethodMeta) -> bool {
    method.visibility() == Visibility::Public
        && !method.is_static()
        && method.kind() == MethodKind::Regular
        && !method.is_from_base_type()
}

/// Overload-safe identity for a method of a type
///
/// Shares the metadata's interned strings, so this is a handful of
/// reference-count bumps.
#[inline]
pub fn identity_of(ty: &TypeMeta, method: &MethodMeta) -> MethodIdentity {
    MethodIdentity::from_parts(
        Arc::clone(ty.name()),
        Arc::clone(method.name()),
        Arc::clone(method.params()),
    )
}

/// Locate the concrete method behind an interface-declared one
///
/// Scans the candidate concrete types in order for the first that
/// implements the interface and declares an eligible member with matching
/// name and parameter list. `None` means "do not intercept" - an explicit
/// or hidden implementation is silently skipped, never an error.
pub fn resolve_implementation<I>(
    interface_method: &MethodIdentity,
    candidates: I,
) -> Option<MethodIdentity>
where
    I: IntoIterator<Item = Arc<TypeMeta>>,
{
    for candidate in candidates {
        let implements = candidate
            .interfaces()
            .iter()
            .any(|iface| iface.as_ref() == interface_method.owner());
        if !implements {
            continue;
        }
        if let Some(method) =
            candidate.find_method(interface_method.name(), interface_method.params())
        {
            if is_eligible(method) {
                return Some(interface_method.with_owner(Arc::clone(candidate.name())));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use intercept_common::MethodKind;

    #[test]
    fn test_eligibility_filter() {
        assert!(is_eligible(&MethodMeta::new("Create", &["OrderRequest"])));
        assert!(!is_eligible(&MethodMeta::new("Create", &[]).non_public()));
        assert!(!is_eligible(&MethodMeta::new("Create", &[]).static_method()));
        assert!(!is_eligible(
            &MethodMeta::new("OrderService", &[]).with_kind(MethodKind::Constructor)
        ));
        assert!(!is_eligible(
            &MethodMeta::new("get_Status", &[]).with_kind(MethodKind::PropertyGetter)
        ));
        assert!(!is_eligible(
            &MethodMeta::new("add_Changed", &[]).with_kind(MethodKind::EventAdd)
        ));
        assert!(!is_eligible(&MethodMeta::new("ToString", &[]).from_base_type()));
    }

    #[test]
    fn test_identity_of() {
        let ty = TypeMeta::concrete("OrderService")
            .with_method(MethodMeta::new("Cancel", &["Guid"]));
        let id = identity_of(&ty, &ty.methods()[0]);
        assert_eq!(id.owner(), "OrderService");
        assert_eq!(id.name(), "Cancel");
        assert_eq!(id.params().len(), 1);
    }

    #[test]
    fn test_resolve_implementation() {
        let unrelated = Arc::new(
            TypeMeta::concrete("AuditService").with_method(MethodMeta::new("Create", &["Req"])),
        );
        let implementor = Arc::new(
            TypeMeta::concrete("OrderService")
                .implements("IOrderService")
                .with_method(MethodMeta::new("Create", &["Req"])),
        );

        let iface_method = MethodIdentity::new("IOrderService", "Create", &["Req"]);
        let resolved =
            resolve_implementation(&iface_method, [unrelated, implementor]).unwrap();
        assert_eq!(resolved.owner(), "OrderService");
        assert_eq!(resolved.name(), "Create");
    }

    #[test]
    fn test_resolve_implementation_not_found() {
        // Implements the interface but hides the member as non-public
        let hidden = Arc::new(
            TypeMeta::concrete("OrderService")
                .implements("IOrderService")
                .with_method(MethodMeta::new("Create", &["Req"]).non_public()),
        );

        let iface_method = MethodIdentity::new("IOrderService", "Create", &["Req"]);
        assert!(resolve_implementation(&iface_method, [hidden]).is_none());
        assert!(resolve_implementation(&iface_method, []).is_none());
    }

    #[test]
    fn test_resolve_implementation_respects_overloads() {
        let implementor = Arc::new(
            TypeMeta::concrete("OrderService")
                .implements("IOrderService")
                .with_method(MethodMeta::new("Create", &["Req", "Options"])),
        );

        // Same name, different parameter list - no match
        let iface_method = MethodIdentity::new("IOrderService", "Create", &["Req"]);
        assert!(resolve_implementation(&iface_method, [implementor]).is_none());
    }
}
