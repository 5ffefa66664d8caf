//! Demo commands
//!
//! A [`Demo`] ties one platform backend to one namespace. Each command
//! lives in its own submodule and is exposed as a method here.

mod bootstrap;
mod destroy;
mod list;
mod query;
mod task;
mod write;

pub use bootstrap::Bootstrapped;
pub use list::Listing;
pub use query::{DOWNSAMPLE_START, READ_IN_START, READ_OUT_START};
pub use task::TASK_EVERY;
pub use write::WriteOptions;

use crate::config::DemoConfig;
use crate::namespace::Namespace;
use anyhow::{Context, Result};
use platdemo_authz::{find_authorization, RequiredPermissions};
use platdemo_core::traits::Platform;
use platdemo_core::{Authorization, Bucket, Organization, PlatformId, User};
use tracing::{debug, warn};

/// Demo commands bound to one platform and namespace
pub struct Demo<P> {
    platform: P,
    namespace: Namespace,
    config: DemoConfig,
}

impl<P: Platform> Demo<P> {
    pub fn new(platform: P, namespace: Namespace, config: DemoConfig) -> Self {
        Self {
            platform,
            namespace,
            config,
        }
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    async fn user(&self) -> Result<User> {
        let name = self.namespace.user_name();
        self.platform
            .find_user_by_name(&name)
            .await
            .with_context(|| format!("Failed to find user {:?}", name))
    }

    async fn org(&self) -> Result<Organization> {
        let name = self.namespace.org_name();
        self.platform
            .find_organization_by_name(&name)
            .await
            .with_context(|| format!("Failed to find org {:?}", name))
    }

    async fn bucket(&self, name: &str) -> Result<Bucket> {
        self.platform
            .find_bucket_by_name(&self.namespace.org_name(), name)
            .await
            .with_context(|| format!("Failed to find bucket {:?}", name))
    }

    async fn bucket_in(&self) -> Result<Bucket> {
        self.bucket(&self.namespace.bucket_in_name()).await
    }

    async fn bucket_out(&self) -> Result<Bucket> {
        self.bucket(&self.namespace.bucket_out_name()).await
    }

    /// Pick the first of the user's authorizations granting `required`.
    ///
    /// On failure every examined authorization is logged before giving up.
    async fn select_credential(
        &self,
        user_id: PlatformId,
        required: &RequiredPermissions,
        purpose: &str,
    ) -> Result<Authorization> {
        let auths = self
            .platform
            .find_authorizations_by_user(user_id)
            .await
            .with_context(|| format!("Failed to list authorizations for user {}", user_id))?;

        match find_authorization(&auths, required) {
            Ok(auth) => {
                debug!("Using {} to {}", auth, purpose);
                Ok(auth.clone())
            }
            Err(e) => {
                warn!("Unable to find existing auth for user {} to {}", user_id, purpose);
                warn!("Found authorizations:");
                for auth in &auths {
                    warn!("  {}", auth);
                }
                Err(anyhow::Error::new(e).context("giving up"))
            }
        }
    }
}
