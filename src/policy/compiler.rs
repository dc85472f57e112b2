//! Category compiler: policy fragments to compiled decision values
//!
//! A category policy compiles into a [`CompiledCategory`], a small
//! tagged enum interpreted by a single evaluation routine. Rule checks
//! are ordered most specific first. A rule may abstain, meaning it has
//! no opinion on the entity; abstaining is distinct from an explicit
//! deny, and a decision where every rule abstains denies.

use std::collections::BTreeMap;

use tracing::debug;

use super::{CategoryPolicy, SubcategoryPolicy};
use crate::types::domain;

/// Compiled decision function for one policy category.
///
/// Pure data, safe to cache indefinitely for a given input fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledCategory {
    /// Every entity is allowed.
    AllowAll,
    /// Every entity is denied.
    DenyAll,
    /// Exactly one rule; an abstaining rule denies.
    Single(RuleCheck),
    /// Several rules tried in order; the first non-abstaining result
    /// wins, and all-abstain denies.
    Ordered(Vec<RuleCheck>),
}

impl CompiledCategory {
    /// Decide access for one entity.
    ///
    /// `keys` is accepted for forward extensibility (e.g. separate
    /// read/write decisions); the entities category ignores its
    /// content.
    pub fn check(&self, entity_id: &str, _keys: &[&str]) -> bool {
        match self {
            Self::AllowAll => true,
            Self::DenyAll => false,
            Self::Single(rule) => rule.apply(entity_id) == Some(true),
            Self::Ordered(rules) => rules
                .iter()
                .find_map(|rule| rule.apply(entity_id))
                .unwrap_or(false),
        }
    }
}

/// One rule inside a compiled category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleCheck {
    /// Full entity-id lookup; ids not in the table abstain.
    EntityIds(BTreeMap<String, bool>),
    /// Blanket domain decision; never abstains.
    AllDomains(bool),
    /// Domain-prefix lookup; domains not in the table abstain.
    Domains(BTreeMap<String, bool>),
}

impl RuleCheck {
    /// Apply the rule to an entity id. `None` means the rule has no
    /// opinion.
    fn apply(&self, entity_id: &str) -> Option<bool> {
        match self {
            Self::EntityIds(ids) => ids.get(entity_id).copied(),
            Self::AllDomains(allowed) => Some(*allowed),
            Self::Domains(domains) => domains.get(domain(entity_id)).copied(),
        }
    }
}

/// Compile the `entities` category of a policy document.
///
/// An absent or falsy fragment denies everything, a boolean `true`
/// allows everything. Otherwise rules are collected most specific
/// first: a boolean `entity_ids` clause is a terminal decision for
/// every entity and overrides any `domains` clause; a per-id table
/// beats domain rules; domain rules apply last. An empty lookup table
/// contributes no rule.
pub fn compile_entities(policy: Option<&CategoryPolicy>) -> CompiledCategory {
    let detailed = match policy {
        None | Some(CategoryPolicy::All(false)) => return CompiledCategory::DenyAll,
        Some(CategoryPolicy::All(true)) => return CompiledCategory::AllowAll,
        Some(CategoryPolicy::Detailed(detailed)) => detailed,
    };

    let mut rules = Vec::new();

    match &detailed.entity_ids {
        // A blanket entity_ids decision is final, whatever domains say.
        Some(SubcategoryPolicy::All(allowed)) => {
            return if *allowed {
                CompiledCategory::AllowAll
            } else {
                CompiledCategory::DenyAll
            };
        }
        Some(SubcategoryPolicy::PerItem(ids)) if !ids.is_empty() => {
            rules.push(RuleCheck::EntityIds(ids.clone()));
        }
        _ => {}
    }

    match &detailed.domains {
        Some(SubcategoryPolicy::All(allowed)) => rules.push(RuleCheck::AllDomains(*allowed)),
        Some(SubcategoryPolicy::PerItem(domains)) if !domains.is_empty() => {
            rules.push(RuleCheck::Domains(domains.clone()));
        }
        _ => {}
    }

    debug!(rules = rules.len(), "compiled entities category");

    match rules.len() {
        0 => CompiledCategory::DenyAll,
        1 => CompiledCategory::Single(rules.remove(0)),
        _ => CompiledCategory::Ordered(rules),
    }
}
