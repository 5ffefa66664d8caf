use super::Demo;
use anyhow::{Context, Result};
use platdemo_authz::RequiredPermissions;
use platdemo_core::traits::Platform;
use platdemo_core::Permission;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// How long `write` runs and how fast
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    /// Stop after this many successful writes; `None` runs until shutdown
    pub count: Option<u64>,
    /// Pause between writes
    pub interval: Duration,
}

impl<P: Platform> Demo<P> {
    /// Write `counter n=<i>` points into the input bucket until `shutdown`
    /// resolves or `options.count` writes have succeeded.
    ///
    /// Returns the number of points written.
    pub async fn write<F>(&self, options: WriteOptions, shutdown: F) -> Result<u64>
    where
        F: Future<Output = ()>,
    {
        let user = self.user().await?;
        let org = self.org().await?;
        let bucket = self.bucket_in().await?;

        let required = RequiredPermissions::new(Permission::write_bucket(org.id, bucket.id));
        let auth = self
            .select_credential(user.id, &required, "write to the input bucket")
            .await?;
        info!("Writing to {} with authorization {}", bucket.name, auth.id);

        tokio::pin!(shutdown);

        let mut written = 0;
        loop {
            if options.count.is_some_and(|count| written >= count) {
                break;
            }

            let line = format!("counter n={}", written);
            self.platform
                .write_lines(&auth, &org.name, &bucket.name, &line)
                .await
                .with_context(|| format!("Failed to write {:?}", line))?;
            debug!("Wrote {:?}", line);
            written += 1;

            if options.count.is_some_and(|count| written >= count) {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(options.interval) => {}
                _ = &mut shutdown => {
                    info!("Received shutdown signal, stopping writes");
                    break;
                }
            }
        }

        info!("Wrote {} points", written);
        Ok(written)
    }
}
