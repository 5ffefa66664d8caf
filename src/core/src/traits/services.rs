//! Platform service traits
//!
//! Management calls (users, orgs, buckets, authorizations) run with the
//! backend's own credential. Data-plane calls (tasks, queries, writes) take
//! the [`Authorization`] whose token should be presented.

use crate::error::Result;
use crate::types::{
    Authorization, Bucket, NewAuthorization, NewBucket, NewTask, Organization, PlatformId, Task,
    User,
};
use async_trait::async_trait;

/// User management
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user
    async fn create_user(&self, name: &str) -> Result<User>;

    /// Find a user by exact name, `NotFound` if absent
    async fn find_user_by_name(&self, name: &str) -> Result<User>;

    /// Delete a user
    async fn delete_user(&self, id: PlatformId) -> Result<()>;
}

/// Organization management
#[async_trait]
pub trait OrganizationService: Send + Sync {
    /// Create an organization
    async fn create_organization(&self, name: &str) -> Result<Organization>;

    /// Find an organization by exact name, `NotFound` if absent
    async fn find_organization_by_name(&self, name: &str) -> Result<Organization>;

    /// Delete an organization
    async fn delete_organization(&self, id: PlatformId) -> Result<()>;
}

/// Bucket management
#[async_trait]
pub trait BucketService: Send + Sync {
    /// Create a bucket
    async fn create_bucket(&self, bucket: NewBucket) -> Result<Bucket>;

    /// Find a bucket by name within the named organization, `NotFound` if absent
    async fn find_bucket_by_name(&self, org_name: &str, name: &str) -> Result<Bucket>;

    /// Delete a bucket
    async fn delete_bucket(&self, id: PlatformId) -> Result<()>;
}

/// Authorization management
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    /// Issue a new authorization
    async fn create_authorization(&self, auth: NewAuthorization) -> Result<Authorization>;

    /// All authorizations owned by a user, in the order the platform returns them
    async fn find_authorizations_by_user(&self, user_id: PlatformId) -> Result<Vec<Authorization>>;

    /// Revoke an authorization
    async fn delete_authorization(&self, id: PlatformId) -> Result<()>;
}

/// Task management
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Create a task using `credential`'s token
    async fn create_task(&self, credential: &Authorization, task: NewTask) -> Result<Task>;

    /// Tasks owned by an organization
    async fn find_tasks_by_org(&self, org_id: PlatformId) -> Result<Vec<Task>>;

    /// Delete a task
    async fn delete_task(&self, id: PlatformId) -> Result<()>;
}

/// Flux query execution
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Run `flux` in `org_id` and return the annotated CSV response verbatim
    async fn query(&self, credential: &Authorization, org_id: PlatformId, flux: &str)
        -> Result<String>;
}

/// Line-protocol writes
#[async_trait]
pub trait PointWriter: Send + Sync {
    /// Write line-protocol `lines` to `bucket` in `org`
    async fn write_lines(
        &self,
        credential: &Authorization,
        org: &str,
        bucket: &str,
        lines: &str,
    ) -> Result<()>;
}

/// Every service the demo needs from one backend
pub trait Platform:
    UserService
    + OrganizationService
    + BucketService
    + AuthorizationService
    + TaskService
    + QueryService
    + PointWriter
{
}

impl<T> Platform for T where
    T: UserService
        + OrganizationService
        + BucketService
        + AuthorizationService
        + TaskService
        + QueryService
        + PointWriter
{
}
