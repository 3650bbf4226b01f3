//! Per-request identity resolved by the auth service.

use super::permissions::Permission;

/// Service-wide role of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServiceRole {
    #[default]
    User,
    Admin,
}

/// Service-level permissions carried by the requester.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicePermissions {
    pub roles: Vec<ServiceRole>,
}

impl ServicePermissions {
    pub fn new(roles: Vec<ServiceRole>) -> Self {
        Self { roles }
    }

    pub fn is_service_admin(&self) -> bool {
        self.roles.contains(&ServiceRole::Admin)
    }
}

/// The user behind a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requester {
    pub user_id: u64,
    pub username: String,
    pub service_permissions: ServicePermissions,
}

/// Session data attached to an authenticated request. Read-only in this layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: String,
    pub requester: Requester,
    pub active_account_id: u64,
}

impl SessionContext {
    pub fn user_id(&self) -> u64 {
        self.requester.user_id
    }

    pub fn is_service_admin(&self) -> bool {
        self.requester.service_permissions.is_service_admin()
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.requester.service_permissions.has_permission(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_detection() {
        let mut session = SessionContext::default();
        assert!(!session.is_service_admin());

        session.requester.service_permissions = ServicePermissions::new(vec![ServiceRole::User, ServiceRole::Admin]);
        assert!(session.is_service_admin());
    }
}
