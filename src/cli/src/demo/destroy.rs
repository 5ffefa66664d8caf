use super::Demo;
use platdemo_core::traits::Platform;
use platdemo_core::{PlatformId, Result as CoreResult};
use tracing::{info, warn};

impl<P: Platform> Demo<P> {
    /// Delete everything the namespace owns, continuing past failures.
    ///
    /// Returns how many entities were deleted.
    pub async fn destroy(&self) -> usize {
        let mut deleted = 0;

        let user = self.user().await;
        let org = self.org().await;

        match &org {
            Ok(org) => match self.platform.find_tasks_by_org(org.id).await {
                Ok(tasks) => {
                    for task in tasks {
                        let result = self.platform.delete_task(task.id).await;
                        deleted += report("task", task.id, result);
                    }
                }
                Err(e) => warn!("could not list tasks: {}; continuing", e),
            },
            Err(e) => warn!("{:#}; skipping tasks", e),
        }

        match &user {
            Ok(user) => match self.platform.find_authorizations_by_user(user.id).await {
                Ok(auths) => {
                    for auth in auths {
                        let result = self.platform.delete_authorization(auth.id).await;
                        deleted += report("authorization", auth.id, result);
                    }
                }
                Err(e) => warn!("could not list authorizations: {}; continuing", e),
            },
            Err(e) => warn!("{:#}; skipping authorizations", e),
        }

        for bucket in [self.bucket_in().await, self.bucket_out().await] {
            match bucket {
                Ok(bucket) => {
                    let result = self.platform.delete_bucket(bucket.id).await;
                    deleted += report("bucket", bucket.id, result);
                }
                Err(e) => warn!("{:#}; continuing", e),
            }
        }

        if let Ok(user) = &user {
            let result = self.platform.delete_user(user.id).await;
            deleted += report("user", user.id, result);
        }

        if let Ok(org) = &org {
            let result = self.platform.delete_organization(org.id).await;
            deleted += report("org", org.id, result);
        }

        info!("Deleted {} entities", deleted);
        deleted
    }
}

/// Log a deletion outcome, returning 1 on success
fn report(what: &str, id: PlatformId, result: CoreResult<()>) -> usize {
    match result {
        Ok(()) => {
            info!("Deleted {} {}", what, id);
            1
        }
        Err(e) => {
            warn!("Failed to delete {} {}: {}; continuing", what, id, e);
            0
        }
    }
}
