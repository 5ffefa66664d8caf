//! Permission model
//!
//! A [`Permission`] pairs an [`Action`] with a [`Resource`]. Resources may be
//! scoped to a single ID, to every resource of a kind inside one org, or to
//! every resource of a kind on the platform. [`Permission::allows`] decides
//! whether a held permission covers a requested one.

use super::id::PlatformId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Action a permission grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Write,
    Create,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Create => "create",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of resource a permission applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Authorizations,
    Buckets,
    Orgs,
    Tasks,
    Users,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Authorizations => "authorizations",
            ResourceKind::Buckets => "buckets",
            ResourceKind::Orgs => "orgs",
            ResourceKind::Tasks => "tasks",
            ResourceKind::Users => "users",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource reference inside a permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    /// Resource kind
    #[serde(rename = "type")]
    pub kind: ResourceKind,

    /// Specific resource, if scoped to one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PlatformId>,

    /// Owning organization, if scoped to one
    #[serde(rename = "orgID", default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<PlatformId>,
}

impl Resource {
    /// Every resource of `kind` on the platform
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            id: None,
            org_id: None,
        }
    }

    /// Scope to an organization
    pub fn with_org(mut self, org_id: PlatformId) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Scope to a single resource
    pub fn with_id(mut self, id: PlatformId) -> Self {
        self.id = Some(id);
        self
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(org_id) = self.org_id {
            write!(f, "orgs/{}/", org_id)?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(id) = self.id {
            write!(f, "/{}", id)?;
        }
        Ok(())
    }
}

/// Permission granted by an authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub action: Action,
    pub resource: Resource,
}

impl Permission {
    pub fn new(action: Action, resource: Resource) -> Self {
        Self { action, resource }
    }

    /// Read a single bucket
    pub fn read_bucket(org_id: PlatformId, bucket_id: PlatformId) -> Self {
        Self::new(
            Action::Read,
            Resource::new(ResourceKind::Buckets)
                .with_org(org_id)
                .with_id(bucket_id),
        )
    }

    /// Write a single bucket
    pub fn write_bucket(org_id: PlatformId, bucket_id: PlatformId) -> Self {
        Self::new(
            Action::Write,
            Resource::new(ResourceKind::Buckets)
                .with_org(org_id)
                .with_id(bucket_id),
        )
    }

    /// Create tasks in an organization
    pub fn create_task(org_id: PlatformId) -> Self {
        Self::new(
            Action::Create,
            Resource::new(ResourceKind::Tasks).with_org(org_id),
        )
    }

    /// Whether holding `self` grants `requested`.
    ///
    /// Actions and kinds must match exactly; no action implies another.
    /// Beyond that:
    /// - an unscoped permission covers every resource of its kind
    /// - an org-scoped permission covers any request carrying the same org
    /// - an ID-scoped permission covers any request for the same ID
    pub fn allows(&self, requested: &Permission) -> bool {
        if self.action != requested.action || self.resource.kind != requested.resource.kind {
            return false;
        }

        match (self.resource.id, self.resource.org_id) {
            (None, None) => true,
            (None, Some(org_id)) => requested.resource.org_id == Some(org_id),
            (Some(id), _) => requested.resource.id == Some(id),
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.action, self.resource)
    }
}
