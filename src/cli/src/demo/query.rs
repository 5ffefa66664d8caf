use super::Demo;
use crate::flux;
use anyhow::{Context, Result};
use platdemo_authz::RequiredPermissions;
use platdemo_core::traits::Platform;
use platdemo_core::Permission;
use tracing::info;

/// Default range start for reading the input bucket
pub const READ_IN_START: &str = "-5s";

/// Default range start for reading the output bucket
pub const READ_OUT_START: &str = "-15s";

/// Range start for a one-off downsample
pub const DOWNSAMPLE_START: &str = "-5s";

impl<P: Platform> Demo<P> {
    /// Query the input bucket from `start`, returning the CSV response
    pub async fn read_in(&self, start: &str) -> Result<String> {
        let bucket = self.namespace.bucket_in_name();
        self.read_bucket(&bucket, start).await
    }

    /// Query the output bucket from `start`, returning the CSV response
    pub async fn read_out(&self, start: &str) -> Result<String> {
        let bucket = self.namespace.bucket_out_name();
        self.read_bucket(&bucket, start).await
    }

    async fn read_bucket(&self, name: &str, start: &str) -> Result<String> {
        let user = self.user().await?;
        let org = self.org().await?;
        let bucket = self.bucket(name).await?;

        let required = RequiredPermissions::new(Permission::read_bucket(org.id, bucket.id));
        let auth = self
            .select_credential(user.id, &required, &format!("read {}", bucket.name))
            .await?;

        let query = flux::read_range(&bucket.name, start);
        info!("Querying {} with authorization {}", bucket.name, auth.id);
        self.platform
            .query(&auth, org.id, &query)
            .await
            .with_context(|| format!("Query failed: {}", query))
    }

    /// Copy the latest input points into the output bucket once
    pub async fn downsample_once(&self) -> Result<String> {
        let user = self.user().await?;
        let org = self.org().await?;
        let bucket_in = self.bucket_in().await?;
        let bucket_out = self.bucket_out().await?;

        let required = RequiredPermissions::new(Permission::read_bucket(org.id, bucket_in.id))
            .and(Permission::write_bucket(org.id, bucket_out.id));
        let auth = self
            .select_credential(user.id, &required, "downsample")
            .await?;

        let query = flux::downsample(&bucket_in.name, DOWNSAMPLE_START, &bucket_out.name, &org.name);
        info!("Downsampling {} into {}", bucket_in.name, bucket_out.name);
        self.platform
            .query(&auth, org.id, &query)
            .await
            .with_context(|| format!("Query failed: {}", query))
    }
}
