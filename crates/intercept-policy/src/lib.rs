//! Interception Policy Resolution & Cache
//!
//! Decides, for every method of every logged service, whether a call is
//! observed (inputs, outputs, both, or nothing), at which severity, at
//! which severity on failure, and to which named sink - without paying
//! metadata inspection on the hot call path.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                      Decision Lookup                          │
//! │                                                               │
//! │  ┌────────────┐  miss  ┌───────────────┐  miss  ┌──────────┐ │
//! │  │ Installed  │───────►│  Interface    │───────►│ On-demand│ │
//! │  │ TypeEntry  │        │  redirect     │        │ resolve  │ │
//! │  └────────────┘        └───────────────┘        └──────────┘ │
//! │        │ hit (<100ns)        │ registered impl       │       │
//! │        ▼                     ▼                       ▼       │
//! │   [Decision]            [Decision]            [Decision]     │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decisions are resolved once per type at registration time with a fixed
//! precedence - marker disable, marker enable, configuration rule,
//! auto-intercept default - and installed as immutable per-type entries in
//! a concurrent map. Steady-state lookup is a single keyed read.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod inspector;
pub mod resolver;
pub mod rules;

pub use cache::{DecisionStore, TypeEntry};
pub use config::{PolicyConfig, RuleConfig};
pub use engine::{EngineStats, InterceptEngine};
pub use resolver::DecisionResolver;
pub use rules::{Pattern, PatternRule, RuleTable};

// The shared value types move with the engine in practice
pub use intercept_common::{
    Behavior, InterceptError, InterceptResult, InterceptionDecision, InterceptionMarker,
    MethodIdentity, MethodKind, MethodMeta, Severity, TypeKind, TypeMeta, TypeRegistry,
};
