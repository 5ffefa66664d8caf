//! Permission matcher
//!
//! Given an ordered set of credentials and a non-empty set of required
//! permissions, return the first credential granting all of them. Scanning
//! stops at the first match; later, possibly tighter, credentials are never
//! considered.

use crate::error::{AuthzError, Result};
use platdemo_core::{Authorization, Permission};
use std::fmt;

/// Something that can answer whether it grants a permission
pub trait Credential {
    /// Whether `requested` is granted
    fn allows(&self, requested: &Permission) -> bool;
}

impl Credential for Authorization {
    fn allows(&self, requested: &Permission) -> bool {
        self.allowed(requested)
    }
}

/// Non-empty set of permissions an operation needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredPermissions(Vec<Permission>);

impl RequiredPermissions {
    /// Require a single permission
    pub fn new(first: Permission) -> Self {
        Self(vec![first])
    }

    /// Additionally require `permission`
    pub fn and(mut self, permission: Permission) -> Self {
        if !self.0.contains(&permission) {
            self.0.push(permission);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Permission] {
        &self.0
    }
}

impl TryFrom<Vec<Permission>> for RequiredPermissions {
    type Error = AuthzError;

    fn try_from(permissions: Vec<Permission>) -> Result<Self> {
        let mut iter = permissions.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| AuthzError::InvalidInput("at least one permission is required".into()))?;
        Ok(iter.fold(Self::new(first), Self::and))
    }
}

impl fmt::Display for RequiredPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

/// Find the first credential, in iteration order, that grants every
/// permission in `required`.
///
/// Returns [`AuthzError::PermissionNotSatisfied`] when none does, including
/// when `authorizations` is empty.
pub fn find_authorization<'a, C, I>(authorizations: I, required: &RequiredPermissions) -> Result<&'a C>
where
    C: Credential + 'a,
    I: IntoIterator<Item = &'a C>,
{
    find_authorization_with(authorizations, required, |candidate, p| candidate.allows(p))
}

/// Like [`find_authorization`], with an explicit grant predicate
pub fn find_authorization_with<'a, C, I, F>(
    authorizations: I,
    required: &RequiredPermissions,
    allows: F,
) -> Result<&'a C>
where
    C: 'a,
    I: IntoIterator<Item = &'a C>,
    F: Fn(&C, &Permission) -> bool,
{
    let mut examined = 0;
    for candidate in authorizations {
        examined += 1;
        if required.iter().all(|p| allows(candidate, p)) {
            return Ok(candidate);
        }
    }

    Err(AuthzError::PermissionNotSatisfied {
        required: required.to_string(),
        examined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use platdemo_core::{Action, AuthorizationStatus, PlatformId, Resource, ResourceKind};

    const ORG: u64 = 1;
    const B1: u64 = 10;
    const B2: u64 = 11;

    fn id(n: u64) -> PlatformId {
        PlatformId::new(n).unwrap()
    }

    fn read(bucket: u64) -> Permission {
        Permission::read_bucket(id(ORG), id(bucket))
    }

    fn write(bucket: u64) -> Permission {
        Permission::write_bucket(id(ORG), id(bucket))
    }

    fn auth(n: u64, permissions: Vec<Permission>) -> Authorization {
        Authorization {
            id: id(100 + n),
            token: format!("token-{}", n),
            status: AuthorizationStatus::Active,
            user_id: id(2),
            org_id: id(ORG),
            description: None,
            permissions,
        }
    }

    #[test]
    fn test_returns_second_when_first_lacks_action() {
        let auths = vec![auth(1, vec![read(B1)]), auth(2, vec![write(B1)])];
        let required = RequiredPermissions::new(write(B1));

        let found = find_authorization(&auths, &required).unwrap();
        assert_eq!(found.token, "token-2");
    }

    #[test]
    fn test_all_required_permissions_must_be_granted() {
        let auths = vec![auth(1, vec![read(B1)]), auth(2, vec![read(B1), write(B2)])];
        let required = RequiredPermissions::new(read(B1)).and(write(B2));

        let found = find_authorization(&auths, &required).unwrap();
        assert_eq!(found.token, "token-2");
    }

    #[test]
    fn test_empty_authorizations_not_found() {
        let auths: Vec<Authorization> = vec![];
        let required = RequiredPermissions::new(read(B1));

        let err = find_authorization(&auths, &required).unwrap_err();
        assert_eq!(
            err,
            AuthzError::PermissionNotSatisfied {
                required: required.to_string(),
                examined: 0,
            }
        );
    }

    #[test]
    fn test_first_match_wins_over_tighter_later_match() {
        let org_wide = Permission::new(
            Action::Write,
            Resource::new(ResourceKind::Buckets).with_org(id(ORG)),
        );
        let auths = vec![auth(1, vec![org_wide]), auth(2, vec![write(B1)])];

        let found = find_authorization(&auths, &RequiredPermissions::new(write(B1))).unwrap();
        assert_eq!(found.token, "token-1");
    }

    #[test]
    fn test_inactive_authorization_skipped() {
        let mut revoked = auth(1, vec![write(B1)]);
        revoked.status = AuthorizationStatus::Inactive;
        let auths = vec![revoked, auth(2, vec![write(B1)])];

        let found = find_authorization(&auths, &RequiredPermissions::new(write(B1))).unwrap();
        assert_eq!(found.token, "token-2");
    }

    #[test]
    fn test_not_found_reports_examined_count() {
        let auths = vec![auth(1, vec![read(B1)]), auth(2, vec![read(B2)])];

        match find_authorization(&auths, &RequiredPermissions::new(write(B1))) {
            Err(AuthzError::PermissionNotSatisfied { examined, required }) => {
                assert_eq!(examined, 2);
                assert!(required.starts_with("write:"));
            }
            other => panic!("expected PermissionNotSatisfied, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_predicate() {
        // Exact structural matching instead of subsumption
        let org_wide = Permission::new(
            Action::Write,
            Resource::new(ResourceKind::Buckets).with_org(id(ORG)),
        );
        let auths = vec![auth(1, vec![org_wide]), auth(2, vec![write(B1)])];

        let found = find_authorization_with(
            &auths,
            &RequiredPermissions::new(write(B1)),
            |a: &Authorization, p| a.permissions.contains(p),
        )
        .unwrap();
        assert_eq!(found.token, "token-2");
    }

    #[test]
    fn test_required_from_vec() {
        assert!(matches!(
            RequiredPermissions::try_from(vec![]),
            Err(AuthzError::InvalidInput(_))
        ));

        let required = RequiredPermissions::try_from(vec![read(B1), write(B2), read(B1)]).unwrap();
        assert_eq!(required.as_slice(), &[read(B1), write(B2)]);
    }

    #[test]
    fn test_required_display() {
        let required = RequiredPermissions::new(read(B1)).and(Permission::create_task(id(ORG)));
        assert_eq!(
            required.to_string(),
            "read:orgs/0000000000000001/buckets/000000000000000a AND create:orgs/0000000000000001/tasks"
        );
    }
}
