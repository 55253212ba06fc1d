//! Method and type metadata model
//!
//! Markers are runtime-discoverable only through this side-table: the host
//! (typically the dependency container at composition time) describes each
//! service type once, and the engine never touches reflection. A
//! `TypeMeta` is a structural fact about compiled code; once inserted into
//! the registry it is immutable and lives for the process lifetime.

use crate::marker::InterceptionMarker;
use dashmap::DashMap;
use std::sync::Arc;

/// Whether a described type is instantiable or an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A concrete service type
    Concrete,
    /// An interface; lookups redirect to a registered implementation
    Interface,
}

/// Method visibility as seen by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Publicly callable
    Public,
    /// Not callable from outside the type
    NonPublic,
}

/// What kind of member a method entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// An ordinary instance method
    Regular,
    /// A constructor
    Constructor,
    /// A property read accessor
    PropertyGetter,
    /// A property write accessor
    PropertySetter,
    /// An event subscribe accessor
    EventAdd,
    /// An event unsubscribe accessor
    EventRemove,
}

/// Metadata for a single method
#[derive(Debug, Clone)]
pub struct MethodMeta {
    name: Arc<str>,
    params: Arc<[Arc<str>]>,
    visibility: Visibility,
    is_static: bool,
    kind: MethodKind,
    from_base: bool,
    markers: Vec<InterceptionMarker>,
}

impl MethodMeta {
    /// Public non-static regular method with no markers
    pub fn new(name: &str, params: &[&str]) -> Self {
        Self {
            name: Arc::from(name),
            params: params.iter().map(|p| Arc::from(*p)).collect(),
            visibility: Visibility::Public,
            is_static: false,
            kind: MethodKind::Regular,
            from_base: false,
            markers: Vec::new(),
        }
    }

    /// Attach a marker
    pub fn with_marker(mut self, marker: InterceptionMarker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Mark as not publicly callable
    pub fn non_public(mut self) -> Self {
        self.visibility = Visibility::NonPublic;
        self
    }

    /// Mark as static
    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Set the member kind
    pub fn with_kind(mut self, kind: MethodKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark as declared on the universal base object type
    pub fn from_base_type(mut self) -> Self {
        self.from_base = true;
        self
    }

    /// Method name
    #[inline]
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// Ordered parameter type names
    #[inline]
    pub fn params(&self) -> &Arc<[Arc<str>]> {
        &self.params
    }

    /// Visibility
    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Static flag
    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Member kind
    #[inline]
    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    /// Declared on the universal base object type
    #[inline]
    pub fn is_from_base_type(&self) -> bool {
        self.from_base
    }

    /// Attached markers in declaration order
    #[inline]
    pub fn markers(&self) -> &[InterceptionMarker] {
        &self.markers
    }

    /// Name and ordered parameter list match
    #[inline]
    pub fn signature_matches(&self, name: &str, params: &[Arc<str>]) -> bool {
        self.name.as_ref() == name
            && self.params.len() == params.len()
            && self
                .params
                .iter()
                .zip(params)
                .all(|(a, b)| a.as_ref() == b.as_ref())
    }
}

/// Metadata for a service type
#[derive(Debug, Clone)]
pub struct TypeMeta {
    name: Arc<str>,
    kind: TypeKind,
    implements: Vec<Arc<str>>,
    markers: Vec<InterceptionMarker>,
    methods: Vec<MethodMeta>,
}

impl TypeMeta {
    fn new(name: &str, kind: TypeKind) -> Self {
        Self {
            name: Arc::from(name),
            kind,
            implements: Vec::new(),
            markers: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Describe a concrete service type
    pub fn concrete(name: &str) -> Self {
        Self::new(name, TypeKind::Concrete)
    }

    /// Describe an interface
    pub fn interface(name: &str) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// Record an implemented interface
    pub fn implements(mut self, interface: &str) -> Self {
        self.implements.push(Arc::from(interface));
        self
    }

    /// Attach a type-level marker
    pub fn with_marker(mut self, marker: InterceptionMarker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Add a method
    pub fn with_method(mut self, method: MethodMeta) -> Self {
        self.methods.push(method);
        self
    }

    /// Fully-qualified type name
    #[inline]
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// Concrete or interface
    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Implemented interface names
    #[inline]
    pub fn interfaces(&self) -> &[Arc<str>] {
        &self.implements
    }

    /// Type-level markers in declaration order
    #[inline]
    pub fn markers(&self) -> &[InterceptionMarker] {
        &self.markers
    }

    /// Declared methods
    #[inline]
    pub fn methods(&self) -> &[MethodMeta] {
        &self.methods
    }

    /// Find the member with matching name and parameter list
    pub fn find_method(&self, name: &str, params: &[Arc<str>]) -> Option<&MethodMeta> {
        self.methods.iter().find(|m| m.signature_matches(name, params))
    }
}

/// Concurrent registry of described types, keyed by fully-qualified name
///
/// Populated by the host at startup, read by the engine afterwards.
/// Inserting a name twice replaces the previous description.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: DashMap<Arc<str>, Arc<TypeMeta>>,
}

impl TypeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            types: DashMap::new(),
        }
    }

    /// Insert or replace a type description
    pub fn insert(&self, meta: TypeMeta) {
        self.types.insert(Arc::clone(&meta.name), Arc::new(meta));
    }

    /// Look up a type description by name
    pub fn get(&self, name: &str) -> Option<Arc<TypeMeta>> {
        self.types.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Number of described types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// No types described yet
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::InterceptionMarker;

    #[test]
    fn test_find_method_disambiguates_overloads() {
        let ty = TypeMeta::concrete("OrderService")
            .with_method(MethodMeta::new("Cancel", &["Guid"]))
            .with_method(MethodMeta::new("Cancel", &["String"]));

        let guid: Arc<[Arc<str>]> = ["Guid"].iter().map(|p| Arc::from(*p)).collect();
        let string: Arc<[Arc<str>]> = ["String"].iter().map(|p| Arc::from(*p)).collect();

        assert!(ty.find_method("Cancel", &guid).is_some());
        assert!(ty.find_method("Cancel", &string).is_some());
        assert!(ty.find_method("Cancel", &[]).is_none());
        assert!(ty.find_method("Create", &guid).is_none());
    }

    #[test]
    fn test_registry_replace() {
        let registry = TypeRegistry::new();
        registry.insert(TypeMeta::concrete("OrderService"));
        registry.insert(
            TypeMeta::concrete("OrderService").with_marker(InterceptionMarker::disabled()),
        );

        assert_eq!(registry.len(), 1);
        let meta = registry.get("OrderService").unwrap();
        assert_eq!(meta.markers().len(), 1);
    }

    #[test]
    fn test_method_flags() {
        let method = MethodMeta::new("ToString", &[])
            .from_base_type()
            .with_kind(MethodKind::Regular);
        assert!(method.is_from_base_type());

        let getter = MethodMeta::new("get_Status", &[]).with_kind(MethodKind::PropertyGetter);
        assert_eq!(getter.kind(), MethodKind::PropertyGetter);
    }
}
