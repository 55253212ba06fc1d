//! Overload-safe method identity
//!
//! The cache key for every decision lookup. Two methods share an identity
//! iff owning type, method name and the ordered parameter type list all
//! match, so overloads never collide.

use std::fmt;
use std::sync::Arc;

/// Overload-safe key for a method
///
/// Computed once when a method is first encountered and shared from there:
/// all fields are reference-counted, so cloning (and re-owning the key for
/// the interface-to-implementation redirect) never allocates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodIdentity {
    owner: Arc<str>,
    name: Arc<str>,
    params: Arc<[Arc<str>]>,
}

impl MethodIdentity {
    /// Build an identity from owned parts
    pub fn new(owner: &str, name: &str, params: &[&str]) -> Self {
        Self {
            owner: Arc::from(owner),
            name: Arc::from(name),
            params: params.iter().map(|p| Arc::from(*p)).collect(),
        }
    }

    /// Build an identity sharing already-interned parts
    pub fn from_parts(owner: Arc<str>, name: Arc<str>, params: Arc<[Arc<str>]>) -> Self {
        Self { owner, name, params }
    }

    /// The same method signature keyed under a different owning type
    ///
    /// Used by the interface redirect; shares name and parameter list.
    #[inline]
    pub fn with_owner(&self, owner: Arc<str>) -> Self {
        Self {
            owner,
            name: Arc::clone(&self.name),
            params: Arc::clone(&self.params),
        }
    }

    /// Fully-qualified owning type name
    #[inline]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Method name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered parameter type names
    #[inline]
    pub fn params(&self) -> &[Arc<str>] {
        &self.params
    }
}

impl fmt::Display for MethodIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.owner, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ")")
    }
}
