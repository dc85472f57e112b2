//! Error types for the policy engine

use thiserror::Error;

/// Policy engine errors.
///
/// Deliberately narrow: semantic policy gaps (missing category, missing
/// sub-clause, unmatched entity) always resolve to a boolean decision,
/// never an error. The only fallible operation is accepting a policy
/// document that does not conform to the policy schema.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Policy document does not conform to the policy schema
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
}

/// Result type for policy engine operations
pub type Result<T> = std::result::Result<T, AuthzError>;
