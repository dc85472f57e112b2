//! Policy document definition and parsing
//!
//! A policy document maps category names to category policies. Only the
//! `entities` category exists today. The typed serde model doubles as
//! the schema validator: a document that deserializes is guaranteed to
//! conform, so the compiler never sees a malformed fragment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AuthzError, Result};

pub mod compiler;

pub use compiler::{compile_entities, CompiledCategory, RuleCheck};

/// Name of the entity access category.
pub const CAT_ENTITIES: &str = "entities";

/// The full declarative permission specification for a group.
///
/// Documents are read-only once an evaluator has compiled against them;
/// any policy edit means constructing a new document and a new
/// evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDocument {
    /// Entity access rules. Absent means deny-all for entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<CategoryPolicy>,
}

impl PolicyDocument {
    /// Policy applied when a group has no explicit document: allow all
    /// entity access.
    ///
    /// Equivalent in effect to the owner strategy, but decisions go
    /// through the ordinary compiled path.
    pub fn default_policy() -> Self {
        Self {
            entities: Some(CategoryPolicy::All(true)),
        }
    }

    /// Parse and validate a document from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| AuthzError::InvalidPolicy(e.to_string()))
    }

    /// Parse and validate a document from JSON text.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| AuthzError::InvalidPolicy(e.to_string()))
    }
}

/// Policy for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryPolicy {
    /// Blanket decision: `true` allows every entity, `false` denies
    /// every entity.
    All(bool),
    /// Partial specification through sub-clauses.
    Detailed(DetailedPolicy),
}

/// Sub-clauses of a detailed category policy. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedPolicy {
    /// Rules keyed by domain (the prefix before the first `.`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<SubcategoryPolicy>,

    /// Rules keyed by full entity id. More specific than `domains`, so
    /// these win whenever both have an opinion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_ids: Option<SubcategoryPolicy>,
}

/// One sub-clause: a blanket boolean or a per-item lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubcategoryPolicy {
    /// Blanket decision for every item.
    All(bool),
    /// Explicit decision per item; items not listed have no decision.
    PerItem(BTreeMap<String, bool>),
}
