//! Authorization gate for the catalog.
//!
//! A policy answers one question: may `identity` perform `action` on
//! `resource`? Policies are plain predicates with no access to the transport
//! layer, so every decision can be exercised without a running server.
//! The acting identity is always passed in explicitly.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role granted to an authenticated user by the session subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role '{0}'; expected admin/manager/customer")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "customer" => Ok(Role::Customer),
            _ => Err(RoleParseError(raw.to_string())),
        }
    }
}

/// The acting user of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: String,
    roles: BTreeSet<Role>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            user_id: user_id.into(),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.has_role(*role))
    }
}

/// Operations a policy can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Yes/no decision for one resource type.
///
/// Any `Fn(&Identity, Action, &R) -> bool` is a policy, so most policies are
/// written as free functions.
pub trait Policy<R: ?Sized>: Send + Sync {
    fn allows(&self, identity: &Identity, action: Action, resource: &R) -> bool;
}

impl<R, F> Policy<R> for F
where
    R: ?Sized,
    F: Fn(&Identity, Action, &R) -> bool + Send + Sync,
{
    fn allows(&self, identity: &Identity, action: Action, resource: &R) -> bool {
        self(identity, action, resource)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("user '{user_id}' may not {action} this resource")]
pub struct Denied {
    pub user_id: String,
    pub action: Action,
}

/// Ask `policy` whether `identity` may perform `action` on `resource`.
pub fn can<R, P>(policy: &P, identity: &Identity, action: Action, resource: &R) -> bool
where
    R: ?Sized,
    P: Policy<R> + ?Sized,
{
    let allowed = policy.allows(identity, action, resource);
    tracing::debug!(
        target: "catalog-authz",
        user_id = identity.user_id(),
        %action,
        allowed,
        "authorization decision"
    );
    allowed
}

/// Like [`can`], but turns a refusal into a [`Denied`] error.
pub fn authorize<R, P>(
    policy: &P,
    identity: &Identity,
    action: Action,
    resource: &R,
) -> Result<(), Denied>
where
    R: ?Sized,
    P: Policy<R> + ?Sized,
{
    if can(policy, identity, action, resource) {
        Ok(())
    } else {
        Err(Denied {
            user_id: identity.user_id().to_string(),
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Document {
        owner: &'static str,
    }

    fn owner_only(identity: &Identity, action: Action, doc: &Document) -> bool {
        action == Action::View || identity.user_id() == doc.owner
    }

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" manager ".parse::<Role>(), Ok(Role::Manager));
        assert_eq!(
            "root".parse::<Role>(),
            Err(RoleParseError("root".to_string()))
        );
    }

    #[test]
    fn identity_tracks_roles() {
        let identity = Identity::new("ana", [Role::Manager, Role::Manager]);
        assert!(identity.has_role(Role::Manager));
        assert!(!identity.has_role(Role::Admin));
        assert!(identity.has_any_role(&[Role::Admin, Role::Manager]));
        assert_eq!(identity.roles().count(), 1);
    }

    #[test]
    fn function_policies_answer_per_resource() {
        let doc = Document { owner: "ana" };
        let ana = Identity::new("ana", []);
        let bob = Identity::new("bob", []);

        assert!(can(&owner_only, &ana, Action::Delete, &doc));
        assert!(can(&owner_only, &bob, Action::View, &doc));
        assert!(!can(&owner_only, &bob, Action::Delete, &doc));
    }

    #[test]
    fn authorize_reports_who_was_denied() {
        let doc = Document { owner: "ana" };
        let bob = Identity::new("bob", [Role::Customer]);

        let denied = authorize(&owner_only, &bob, Action::Delete, &doc).unwrap_err();
        assert_eq!(denied.user_id, "bob");
        assert_eq!(denied.action, Action::Delete);
        assert_eq!(denied.to_string(), "user 'bob' may not delete this resource");
    }
}
