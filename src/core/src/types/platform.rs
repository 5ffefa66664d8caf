//! Platform entities and creation requests
//!
//! Field names follow the platform's JSON (`orgID`, `userID`,
//! `retentionRules`, ...).

use super::id::PlatformId;
use super::permission::Permission;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Platform user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: PlatformId,
    pub name: String,
}

/// Organization owning buckets and tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: PlatformId,
    pub name: String,
}

/// Data retention rule for a bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionRule {
    /// Rule type; the platform only knows "expire"
    #[serde(rename = "type")]
    pub kind: String,

    /// Age after which points are dropped
    #[serde(rename = "everySeconds")]
    pub every_seconds: u64,
}

impl RetentionRule {
    /// Expire points older than `period`
    pub fn expire(period: Duration) -> Self {
        Self {
            kind: "expire".to_string(),
            every_seconds: period.as_secs(),
        }
    }
}

/// Bucket holding time-series data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub id: PlatformId,

    #[serde(rename = "orgID")]
    pub org_id: PlatformId,

    pub name: String,

    #[serde(rename = "retentionRules", default)]
    pub retention_rules: Vec<RetentionRule>,
}

/// Request body for bucket creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBucket {
    #[serde(rename = "orgID")]
    pub org_id: PlatformId,

    pub name: String,

    #[serde(rename = "retentionRules")]
    pub retention_rules: Vec<RetentionRule>,
}

/// Authorization lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationStatus {
    #[default]
    Active,
    Inactive,
}

/// Issued credential: a token plus the permissions it grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub id: PlatformId,

    /// Opaque token sent as `Authorization: Token <token>`
    pub token: String,

    #[serde(default)]
    pub status: AuthorizationStatus,

    #[serde(rename = "userID")]
    pub user_id: PlatformId,

    #[serde(rename = "orgID")]
    pub org_id: PlatformId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Granted permissions, in issue order
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Authorization {
    pub fn is_active(&self) -> bool {
        self.status == AuthorizationStatus::Active
    }

    /// Whether this authorization grants `requested`.
    ///
    /// Inactive authorizations grant nothing.
    pub fn allowed(&self, requested: &Permission) -> bool {
        self.is_active() && self.permissions.iter().any(|p| p.allows(requested))
    }
}

impl fmt::Display for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "authorization {} ({:?}) [", self.id, self.status)?;
        for (i, p) in self.permissions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", p)?;
        }
        f.write_str("]")
    }
}

/// Request body for authorization creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthorization {
    #[serde(rename = "orgID")]
    pub org_id: PlatformId,

    #[serde(rename = "userID")]
    pub user_id: PlatformId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub permissions: Vec<Permission>,
}

/// Scheduled Flux task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: PlatformId,

    #[serde(rename = "orgID")]
    pub org_id: PlatformId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub flux: String,
}

/// Request body for task creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    #[serde(rename = "orgID")]
    pub org_id: PlatformId,

    pub flux: String,
}
