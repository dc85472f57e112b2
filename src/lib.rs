//! # Hearth Authorization Engine
//!
//! Entity-level access-control policy engine for the Hearth platform.
//!
//! A declarative, user-editable policy document is compiled into a
//! fast, deterministic decision function. A single access is decided
//! with `check_entity`; a collection is reduced to the visible subset
//! with `filter_entities`.
//!
//! ## Features
//!
//! - **Declarative policy documents** validated through a typed serde
//!   model (`domains` and `entity_ids` clauses, blanket booleans,
//!   per-item lookup tables)
//! - **Precedence-aware compilation**: most specific rule first,
//!   abstaining rules fall through, unmatched entities deny
//! - **Lazy compiled-decision caching** per evaluator, safe under
//!   concurrent first use
//! - **Owner bypass** as a closed strategy variant alongside compiled
//!   evaluation
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use hearth_authz::{Permissions, PolicyDocument, PolicyPermissions};
//!
//! # fn main() -> hearth_authz::Result<()> {
//! let policy = PolicyDocument::from_json(
//!     r#"{"entities": {"domains": {"light": true}, "entity_ids": {"light.porch": false}}}"#,
//! )?;
//!
//! let permissions = Permissions::Policy(Arc::new(PolicyPermissions::new(policy)));
//! assert!(permissions.check_entity("light.kitchen", &[]));
//! assert!(!permissions.check_entity("light.porch", &[]));
//! assert!(!permissions.check_entity("switch.garage", &[]));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod permissions;
pub mod policy;
pub mod types;

// Re-export commonly used types
pub use error::{AuthzError, Result};
pub use models::{Group, User};
pub use permissions::{Permissions, PolicyPermissions};
pub use policy::{
    compile_entities, CategoryPolicy, CompiledCategory, DetailedPolicy, PolicyDocument,
    RuleCheck, SubcategoryPolicy, CAT_ENTITIES,
};
pub use types::Entity;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
