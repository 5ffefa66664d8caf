use super::Demo;
use crate::flux;
use anyhow::{Context, Result};
use platdemo_authz::RequiredPermissions;
use platdemo_core::traits::Platform;
use platdemo_core::{NewTask, Permission, Task};
use tracing::info;

/// How often the downsampling task runs
pub const TASK_EVERY: &str = "5s";

impl<P: Platform> Demo<P> {
    /// Schedule a task that downsamples the input bucket every [`TASK_EVERY`]
    pub async fn create_task(&self) -> Result<Task> {
        let user = self.user().await?;
        let org = self.org().await?;
        let bucket_in = self.bucket_in().await?;
        let bucket_out = self.bucket_out().await?;

        let required = RequiredPermissions::new(Permission::read_bucket(org.id, bucket_in.id))
            .and(Permission::write_bucket(org.id, bucket_out.id))
            .and(Permission::create_task(org.id));
        let auth = self
            .select_credential(user.id, &required, "create a downsampling task")
            .await?;

        let name = format!("demo-{}", chrono::Utc::now().timestamp());
        let script = flux::downsample_task(&name, TASK_EVERY, &bucket_in.name, &bucket_out.name, &org.name);

        let task = self
            .platform
            .create_task(
                &auth,
                NewTask {
                    org_id: org.id,
                    flux: script,
                },
            )
            .await
            .with_context(|| format!("Failed to create task {}", name))?;
        info!("Created task {} ({})", name, task.id);
        Ok(task)
    }
}
