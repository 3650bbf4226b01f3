//! Per-resource permissions and the roles that grant them.
//!
//! Every signed-in requester acts as a member of their active household.
//! Service admins additionally curate the shared `valid_*` catalogues and
//! create recipes.

use std::fmt;

use super::session::{ServicePermissions, ServiceRole};

/// Verb a permission is checked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Read,
    Update,
    Archive,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Archive => "archive",
        }
    }
}

/// An action on a named resource collection, e.g. `update.recipes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission {
    pub action: Action,
    pub resource: &'static str,
}

impl Permission {
    pub const fn new(action: Action, resource: &'static str) -> Self {
        Self { action, resource }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.action.as_str(), self.resource)
    }
}

const CATALOGUES: [&str; 3] = ["valid_instruments", "valid_ingredients", "valid_preparations"];
const RECIPE_CHILDREN: [&str; 2] = ["recipe_steps", "recipe_step_ingredients"];

fn household_member_grants(permission: &Permission) -> bool {
    let resource = permission.resource;
    match permission.action {
        Action::Read => resource == "recipes" || RECIPE_CHILDREN.contains(&resource) || CATALOGUES.contains(&resource),
        Action::Create => RECIPE_CHILDREN.contains(&resource),
        Action::Update | Action::Archive => resource == "recipes" || RECIPE_CHILDREN.contains(&resource),
    }
}

fn service_admin_grants(permission: &Permission) -> bool {
    let resource = permission.resource;
    match permission.action {
        Action::Read => false,
        Action::Create => resource == "recipes" || CATALOGUES.contains(&resource),
        Action::Update | Action::Archive => CATALOGUES.contains(&resource),
    }
}

impl ServiceRole {
    /// Whether this role alone grants `permission`.
    pub fn grants(&self, permission: &Permission) -> bool {
        match self {
            ServiceRole::User => household_member_grants(permission),
            ServiceRole::Admin => service_admin_grants(permission),
        }
    }
}

impl ServicePermissions {
    pub fn has_permission(&self, permission: &Permission) -> bool {
        household_member_grants(permission) || self.roles.iter().any(|role| role.grants(permission))
    }
}
