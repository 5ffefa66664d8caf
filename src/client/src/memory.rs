//! In-memory platform backend
//!
//! Mirrors the HTTP API's observable behavior closely enough to drive the
//! demo commands end to end without a server: names are unique, lookups of
//! missing entities fail with `NotFound`, and data-plane calls are rejected
//! with 401 unless the presented authorization is known and active.
//!
//! Writes and task creation additionally answer 403 unless the authorization
//! grants the needed permission. Queries are not parsed, so they only require
//! an authorization issued for the queried org.

use async_trait::async_trait;
use platdemo_core::traits::{
    AuthorizationService, BucketService, OrganizationService, PointWriter, QueryService,
    TaskService, UserService,
};
use platdemo_core::{
    Authorization, AuthorizationStatus, Bucket, CoreError, NewAuthorization, NewBucket, NewTask,
    Organization, Permission, PlatformId, Result, Task, User,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Placeholder CSV returned for every query
const QUERY_RESULT_CSV: &str = ",result,table\n";

/// Lines accepted by [`PointWriter::write_lines`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenBatch {
    pub org: String,
    pub bucket: String,
    pub lines: String,
    /// Token the batch was written with
    pub token: String,
}

/// Query accepted by [`QueryService::query`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub org_id: PlatformId,
    pub flux: String,
    pub token: String,
}

#[derive(Debug, Default)]
struct State {
    last_id: u64,
    users: Vec<User>,
    orgs: Vec<Organization>,
    buckets: Vec<Bucket>,
    authorizations: Vec<Authorization>,
    tasks: Vec<Task>,
    writes: Vec<WrittenBatch>,
    queries: Vec<RecordedQuery>,
}

impl State {
    fn next_id(&mut self) -> Result<PlatformId> {
        self.last_id += 1;
        PlatformId::new(self.last_id)
    }

    fn org_named(&self, name: &str) -> Result<&Organization> {
        self.orgs
            .iter()
            .find(|o| o.name == name)
            .ok_or_else(|| CoreError::not_found(format!("org {:?}", name)))
    }

    /// Resolve the stored authorization behind `credential` and check it grants `needed`
    fn authorize(
        &self,
        credential: &Authorization,
        needed: &[Permission],
    ) -> Result<&Authorization> {
        let stored = self
            .authorizations
            .iter()
            .find(|a| a.token == credential.token)
            .ok_or_else(|| CoreError::api(401, "unknown token"))?;

        if !stored.is_active() {
            return Err(CoreError::api(401, "authorization is inactive"));
        }

        match needed.iter().find(|p| !stored.allowed(p)) {
            Some(missing) => Err(CoreError::api(403, format!("token lacks {}", missing))),
            None => Ok(stored),
        }
    }
}

/// Platform kept entirely in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryPlatform {
    state: Arc<RwLock<State>>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every batch written so far, oldest first
    pub async fn writes(&self) -> Vec<WrittenBatch> {
        self.state.read().await.writes.clone()
    }

    /// Every query run so far, oldest first
    pub async fn queries(&self) -> Vec<RecordedQuery> {
        self.state.read().await.queries.clone()
    }

    /// Mark an authorization inactive
    pub async fn deactivate_authorization(&self, id: PlatformId) -> Result<()> {
        let mut state = self.state.write().await;
        let auth = state
            .authorizations
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::not_found(format!("authorization {}", id)))?;
        auth.status = AuthorizationStatus::Inactive;
        Ok(())
    }

    /// Number of users, orgs, buckets, authorizations and tasks still present
    pub async fn entity_count(&self) -> usize {
        let state = self.state.read().await;
        state.users.len()
            + state.orgs.len()
            + state.buckets.len()
            + state.authorizations.len()
            + state.tasks.len()
    }
}

fn remove_by_id<T>(
    items: &mut Vec<T>,
    id: PlatformId,
    id_of: impl Fn(&T) -> PlatformId,
    what: &str,
) -> Result<()> {
    let before = items.len();
    items.retain(|item| id_of(item) != id);
    if items.len() == before {
        return Err(CoreError::not_found(format!("{} {}", what, id)));
    }
    Ok(())
}

#[async_trait]
impl UserService for MemoryPlatform {
    async fn create_user(&self, name: &str) -> Result<User> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.name == name) {
            return Err(CoreError::api(422, format!("user {:?} already exists", name)));
        }
        let user = User {
            id: state.next_id()?,
            name: name.to_string(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_name(&self, name: &str) -> Result<User> {
        let state = self.state.read().await;
        state
            .users
            .iter()
            .find(|u| u.name == name)
            .cloned()
            .ok_or_else(|| CoreError::not_found(format!("user {:?}", name)))
    }

    async fn delete_user(&self, id: PlatformId) -> Result<()> {
        let mut state = self.state.write().await;
        remove_by_id(&mut state.users, id, |u| u.id, "user")
    }
}

#[async_trait]
impl OrganizationService for MemoryPlatform {
    async fn create_organization(&self, name: &str) -> Result<Organization> {
        let mut state = self.state.write().await;
        if state.orgs.iter().any(|o| o.name == name) {
            return Err(CoreError::api(422, format!("org {:?} already exists", name)));
        }
        let org = Organization {
            id: state.next_id()?,
            name: name.to_string(),
        };
        state.orgs.push(org.clone());
        Ok(org)
    }

    async fn find_organization_by_name(&self, name: &str) -> Result<Organization> {
        let state = self.state.read().await;
        state.org_named(name).cloned()
    }

    async fn delete_organization(&self, id: PlatformId) -> Result<()> {
        let mut state = self.state.write().await;
        remove_by_id(&mut state.orgs, id, |o| o.id, "org")
    }
}

#[async_trait]
impl BucketService for MemoryPlatform {
    async fn create_bucket(&self, bucket: NewBucket) -> Result<Bucket> {
        let mut state = self.state.write().await;
        if !state.orgs.iter().any(|o| o.id == bucket.org_id) {
            return Err(CoreError::not_found(format!("org {}", bucket.org_id)));
        }
        if state
            .buckets
            .iter()
            .any(|b| b.org_id == bucket.org_id && b.name == bucket.name)
        {
            return Err(CoreError::api(
                422,
                format!("bucket {:?} already exists", bucket.name),
            ));
        }
        let created = Bucket {
            id: state.next_id()?,
            org_id: bucket.org_id,
            name: bucket.name,
            retention_rules: bucket.retention_rules,
        };
        state.buckets.push(created.clone());
        Ok(created)
    }

    async fn find_bucket_by_name(&self, org_name: &str, name: &str) -> Result<Bucket> {
        let state = self.state.read().await;
        let org_id = state.org_named(org_name)?.id;
        state
            .buckets
            .iter()
            .find(|b| b.org_id == org_id && b.name == name)
            .cloned()
            .ok_or_else(|| CoreError::not_found(format!("bucket {:?} in org {:?}", name, org_name)))
    }

    async fn delete_bucket(&self, id: PlatformId) -> Result<()> {
        let mut state = self.state.write().await;
        remove_by_id(&mut state.buckets, id, |b| b.id, "bucket")
    }
}

#[async_trait]
impl AuthorizationService for MemoryPlatform {
    async fn create_authorization(&self, auth: NewAuthorization) -> Result<Authorization> {
        let mut state = self.state.write().await;
        if !state.users.iter().any(|u| u.id == auth.user_id) {
            return Err(CoreError::not_found(format!("user {}", auth.user_id)));
        }
        if auth.permissions.is_empty() {
            return Err(CoreError::api(400, "authorization needs at least one permission"));
        }
        let id = state.next_id()?;
        let created = Authorization {
            id,
            token: format!("memtoken-{}", id),
            status: AuthorizationStatus::Active,
            user_id: auth.user_id,
            org_id: auth.org_id,
            description: auth.description,
            permissions: auth.permissions,
        };
        state.authorizations.push(created.clone());
        Ok(created)
    }

    async fn find_authorizations_by_user(&self, user_id: PlatformId) -> Result<Vec<Authorization>> {
        let state = self.state.read().await;
        Ok(state
            .authorizations
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_authorization(&self, id: PlatformId) -> Result<()> {
        let mut state = self.state.write().await;
        remove_by_id(&mut state.authorizations, id, |a| a.id, "authorization")
    }
}

#[async_trait]
impl TaskService for MemoryPlatform {
    async fn create_task(&self, credential: &Authorization, task: NewTask) -> Result<Task> {
        let mut state = self.state.write().await;
        state.authorize(credential, &[Permission::create_task(task.org_id)])?;

        let name = task
            .flux
            .split("name:")
            .nth(1)
            .and_then(|rest| rest.split('"').nth(1))
            .unwrap_or_default()
            .to_string();

        let created = Task {
            id: state.next_id()?,
            org_id: task.org_id,
            name,
            flux: task.flux,
        };
        state.tasks.push(created.clone());
        Ok(created)
    }

    async fn find_tasks_by_org(&self, org_id: PlatformId) -> Result<Vec<Task>> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.org_id == org_id)
            .cloned()
            .collect())
    }

    async fn delete_task(&self, id: PlatformId) -> Result<()> {
        let mut state = self.state.write().await;
        remove_by_id(&mut state.tasks, id, |t| t.id, "task")
    }
}

#[async_trait]
impl QueryService for MemoryPlatform {
    async fn query(
        &self,
        credential: &Authorization,
        org_id: PlatformId,
        flux: &str,
    ) -> Result<String> {
        let mut state = self.state.write().await;
        if !state.orgs.iter().any(|o| o.id == org_id) {
            return Err(CoreError::not_found(format!("org {}", org_id)));
        }
        let issued_for = state.authorize(credential, &[])?.org_id;
        if issued_for != org_id {
            return Err(CoreError::api(
                403,
                format!("token was issued for org {}, not {}", issued_for, org_id),
            ));
        }
        state.queries.push(RecordedQuery {
            org_id,
            flux: flux.to_string(),
            token: credential.token.clone(),
        });
        Ok(QUERY_RESULT_CSV.to_string())
    }
}

#[async_trait]
impl PointWriter for MemoryPlatform {
    async fn write_lines(
        &self,
        credential: &Authorization,
        org: &str,
        bucket: &str,
        lines: &str,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        let org_id = state.org_named(org)?.id;
        let bucket_id = state
            .buckets
            .iter()
            .find(|b| b.org_id == org_id && b.name == bucket)
            .map(|b| b.id)
            .ok_or_else(|| CoreError::not_found(format!("bucket {:?}", bucket)))?;

        state.authorize(credential, &[Permission::write_bucket(org_id, bucket_id)])?;
        state.writes.push(WrittenBatch {
            org: org.to_string(),
            bucket: bucket.to_string(),
            lines: lines.to_string(),
            token: credential.token.clone(),
        });
        Ok(())
    }
}
