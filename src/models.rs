//! Group and user models
//!
//! The wider platform persists groups and users; this crate models only
//! the shape it consumes: a group owns a policy document, a user points
//! at exactly one group and carries an owner flag.

use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::permissions::{Permissions, PolicyPermissions};
use crate::policy::PolicyDocument;

/// A permission group owning a policy document.
///
/// The evaluator derived from the document is cached on first use and
/// shared by every member of the group. Replacing the policy means
/// constructing a new group: an existing evaluator's compiled cache is
/// never invalidated, so editing a document in place would serve stale
/// decisions.
#[derive(Debug)]
pub struct Group {
    /// Unique group id.
    pub id: String,
    pub name: Option<String>,
    pub policy: PolicyDocument,
    /// System generated groups cannot be changed.
    pub system_generated: bool,

    permissions: RwLock<Option<Arc<PolicyPermissions>>>,
}

impl Group {
    /// Create a group over a policy document.
    pub fn new(name: impl Into<String>, policy: PolicyDocument) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: Some(name.into()),
            policy,
            system_generated: false,
            permissions: RwLock::new(None),
        }
    }

    /// The evaluator derived from this group's document.
    pub fn permissions(&self) -> Arc<PolicyPermissions> {
        if let Some(permissions) = self.permissions.read().as_ref() {
            return permissions.clone();
        }

        let mut slot = self.permissions.write();
        // Another thread may have derived the evaluator while we waited
        // for the write lock; the first derivation wins.
        slot.get_or_insert_with(|| Arc::new(PolicyPermissions::new(self.policy.clone())))
            .clone()
    }
}

/// Group equality excludes the derived-evaluator cache.
impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.policy == other.policy
            && self.system_generated == other.system_generated
    }
}

impl Eq for Group {}

/// A user: the authenticated principal whose permission strategy is
/// being evaluated.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user id.
    pub id: String,
    pub name: Option<String>,
    /// The one group this user belongs to (lookup-only relation).
    pub group: Arc<Group>,
    pub is_owner: bool,
    pub is_active: bool,
}

impl User {
    /// Create a user in the given group.
    pub fn new(name: impl Into<String>, group: Arc<Group>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: Some(name.into()),
            group,
            is_owner: false,
            is_active: false,
        }
    }

    /// Set the owner flag.
    pub fn with_owner(mut self, is_owner: bool) -> Self {
        self.is_owner = is_owner;
        self
    }

    /// The user's effective permission strategy.
    ///
    /// Owners bypass their group's document entirely; everyone else
    /// evaluates through the group's shared evaluator.
    pub fn permissions(&self) -> Permissions {
        if self.is_owner {
            Permissions::Owner
        } else {
            Permissions::Policy(self.group.permissions())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_gets_owner_permissions() {
        let group = Arc::new(Group::new("Test Group", PolicyDocument::default()));
        let owner = User::new("Test User", group.clone()).with_owner(true);

        assert!(matches!(owner.permissions(), Permissions::Owner));
        // The group's deny-all document plays no part for an owner.
        assert!(owner.permissions().check_entity("light.kitchen", &[]));
    }

    #[test]
    fn test_group_members_share_one_evaluator() {
        let group = Arc::new(Group::new("Test Group", PolicyDocument::default_policy()));
        let user = User::new("Test User", group.clone());
        let user2 = User::new("Test User 2", group.clone());

        let (Permissions::Policy(a), Permissions::Policy(b)) =
            (user.permissions(), user2.permissions())
        else {
            panic!("expected policy permissions");
        };
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_owner_and_member_strategies_differ() {
        let group = Arc::new(Group::new("Test Group", PolicyDocument::default_policy()));
        let owner = User::new("Owner", group.clone()).with_owner(true);
        let user = User::new("Member", group);

        assert_ne!(owner.permissions(), user.permissions());
    }

    #[test]
    fn test_group_equality_ignores_derived_evaluator() {
        let warm = Group::new("Group", PolicyDocument::default_policy());
        let mut cold = Group::new("Group", PolicyDocument::default_policy());
        cold.id = warm.id.clone();

        warm.permissions();
        assert_eq!(warm, cold);
    }
}
