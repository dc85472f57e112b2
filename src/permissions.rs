//! Permission strategies: compiled policy evaluation and owner bypass

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::policy::{compile_entities, CompiledCategory, PolicyDocument, CAT_ENTITIES};
use crate::types::Entity;

/// Keys passed to sub-checks when filtering a collection for reading.
const READ_KEYS: &[&str] = &["read"];

/// Document-driven permission evaluator.
///
/// Owns a policy document plus a private cache of compiled decision
/// functions, keyed by category name and populated on first use. The
/// cache is never invalidated: the document is read-only for the life
/// of the evaluator, and any policy edit means constructing a new
/// evaluator.
#[derive(Debug)]
pub struct PolicyPermissions {
    policy: PolicyDocument,
    compiled: DashMap<&'static str, Arc<CompiledCategory>>,
}

impl PolicyPermissions {
    /// Create an evaluator over a policy document.
    pub fn new(policy: PolicyDocument) -> Self {
        Self {
            policy,
            compiled: DashMap::new(),
        }
    }

    /// Borrow the underlying, uncompiled document.
    pub fn policy(&self) -> &PolicyDocument {
        &self.policy
    }

    /// Test whether the entity may be accessed.
    ///
    /// `keys` is carried for forward extensibility; the entities
    /// category currently ignores its content.
    pub fn check_entity(&self, entity_id: &str, keys: &[&str]) -> bool {
        self.category(CAT_ENTITIES).check(entity_id, keys)
    }

    /// Keep the entities the policy allows to be read, in their
    /// original relative order.
    pub fn filter_entities<E: Entity>(&self, mut entities: Vec<E>) -> Vec<E> {
        let compiled = self.category(CAT_ENTITIES);
        let before = entities.len();
        entities.retain(|entity| compiled.check(entity.entity_id(), READ_KEYS));
        debug!(before, after = entities.len(), "filtered entities");
        entities
    }

    /// Fetch the compiled decision function for a category, compiling
    /// it on first use.
    ///
    /// Racing first uses may compile the same category twice; only one
    /// result is kept, and since compilation is pure the duplicate work
    /// is harmless.
    fn category(&self, name: &'static str) -> Arc<CompiledCategory> {
        if let Some(compiled) = self.compiled.get(name) {
            return compiled.clone();
        }

        debug!(category = name, "compiling policy category");
        let compiled = Arc::new(match name {
            CAT_ENTITIES => compile_entities(self.policy.entities.as_ref()),
            // Categories this document knows nothing about have no
            // rules and deny by default.
            _ => CompiledCategory::DenyAll,
        });

        self.compiled.entry(name).or_insert(compiled).value().clone()
    }
}

/// Two evaluators are equal when their raw documents are equal; cache
/// population state never takes part in the comparison.
impl PartialEq for PolicyPermissions {
    fn eq(&self, other: &Self) -> bool {
        self.policy == other.policy
    }
}

impl Eq for PolicyPermissions {}

/// Permission strategy attached to a principal.
///
/// The variant set is closed by design: either the owner bypass or
/// document-driven evaluation. Both expose the same capability set.
#[derive(Debug, Clone)]
pub enum Permissions {
    /// Unconditional allow-all for a principal with owner status. The
    /// group's document is bypassed entirely, whatever it contains.
    Owner,
    /// Compiled evaluation over a group's shared evaluator.
    Policy(Arc<PolicyPermissions>),
}

impl Permissions {
    /// Test whether the entity may be accessed.
    pub fn check_entity(&self, entity_id: &str, keys: &[&str]) -> bool {
        match self {
            Self::Owner => true,
            Self::Policy(policy) => policy.check_entity(entity_id, keys),
        }
    }

    /// Filter a collection down to the entities the principal may see.
    ///
    /// The owner strategy returns its input unchanged; the policy
    /// strategy filters stably, preserving relative order.
    pub fn filter_entities<E: Entity>(&self, entities: Vec<E>) -> Vec<E> {
        match self {
            Self::Owner => entities,
            Self::Policy(policy) => policy.filter_entities(entities),
        }
    }
}

impl PartialEq for Permissions {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Owner, Self::Owner) => true,
            (Self::Policy(a), Self::Policy(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Permissions {}
