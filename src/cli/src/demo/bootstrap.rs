use super::Demo;
use anyhow::{Context, Result};
use platdemo_core::traits::Platform;
use platdemo_core::{
    Authorization, Bucket, NewAuthorization, NewBucket, Organization, Permission, RetentionRule,
    User,
};
use std::time::Duration;
use tracing::info;

/// Everything `bootstrap` created
#[derive(Debug, Clone)]
pub struct Bootstrapped {
    pub user: User,
    pub org: Organization,
    pub bucket_in: Bucket,
    pub bucket_out: Bucket,
    /// Write-in, read-in, downsample (read-in + write-out + create task), read-out
    pub authorizations: Vec<Authorization>,
}

impl<P: Platform> Demo<P> {
    /// Create the namespace's user, org, buckets and authorizations
    pub async fn bootstrap(&self) -> Result<Bootstrapped> {
        let user = self
            .platform
            .create_user(&self.namespace.user_name())
            .await
            .context("Failed to create user")?;
        info!("Created user {} ({})", user.name, user.id);

        let org = self
            .platform
            .create_organization(&self.namespace.org_name())
            .await
            .context("Failed to create org")?;
        info!("Created org {} ({})", org.name, org.id);

        let bucket_in = self
            .create_bucket(&org, self.namespace.bucket_in_name(), self.config.input_retention())
            .await?;
        let bucket_out = self
            .create_bucket(&org, self.namespace.bucket_out_name(), self.config.output_retention())
            .await?;

        let grants = [
            (
                "write input",
                vec![Permission::write_bucket(org.id, bucket_in.id)],
            ),
            (
                "read input",
                vec![Permission::read_bucket(org.id, bucket_in.id)],
            ),
            (
                "downsample",
                vec![
                    Permission::read_bucket(org.id, bucket_in.id),
                    Permission::write_bucket(org.id, bucket_out.id),
                    Permission::create_task(org.id),
                ],
            ),
            (
                "read output",
                vec![Permission::read_bucket(org.id, bucket_out.id)],
            ),
        ];

        let mut authorizations = Vec::with_capacity(grants.len());
        for (purpose, permissions) in grants {
            let auth = self
                .platform
                .create_authorization(NewAuthorization {
                    org_id: org.id,
                    user_id: user.id,
                    description: Some(format!("{} ({})", purpose, self.namespace)),
                    permissions,
                })
                .await
                .with_context(|| format!("Failed to create {} authorization", purpose))?;
            info!("Created {}", auth);
            authorizations.push(auth);
        }

        Ok(Bootstrapped {
            user,
            org,
            bucket_in,
            bucket_out,
            authorizations,
        })
    }

    async fn create_bucket(
        &self,
        org: &Organization,
        name: String,
        retention: Duration,
    ) -> Result<Bucket> {
        let bucket = self
            .platform
            .create_bucket(NewBucket {
                org_id: org.id,
                name,
                retention_rules: vec![RetentionRule::expire(retention)],
            })
            .await
            .context("Failed to create bucket")?;
        info!(
            "Created bucket {} ({}) retaining {}s",
            bucket.name,
            bucket.id,
            retention.as_secs()
        );
        Ok(bucket)
    }
}
