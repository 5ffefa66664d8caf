use super::Demo;
use platdemo_core::traits::Platform;
use platdemo_core::{Authorization, Bucket, Organization, User};
use tracing::{info, warn};

/// What `list` found; absent entities are `None`
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub user: Option<User>,
    pub org: Option<Organization>,
    pub bucket_in: Option<Bucket>,
    pub bucket_out: Option<Bucket>,
    pub authorizations: Vec<Authorization>,
}

impl<P: Platform> Demo<P> {
    /// Log every demo entity of the namespace, skipping over missing ones
    pub async fn list(&self) -> Listing {
        let mut listing = Listing::default();

        match self.user().await {
            Ok(user) => {
                info!("User: {} ({})", user.name, user.id);
                listing.user = Some(user);
            }
            Err(e) => warn!("could not find user: {:#}; continuing", e),
        }

        match self.org().await {
            Ok(org) => {
                info!("Org: {} ({})", org.name, org.id);
                listing.org = Some(org);
            }
            Err(e) => warn!("could not find org: {:#}; continuing", e),
        }

        match self.bucket_in().await {
            Ok(bucket) => {
                info!("Input bucket: {} ({})", bucket.name, bucket.id);
                listing.bucket_in = Some(bucket);
            }
            Err(e) => warn!("could not find input bucket: {:#}; continuing", e),
        }

        match self.bucket_out().await {
            Ok(bucket) => {
                info!("Output bucket: {} ({})", bucket.name, bucket.id);
                listing.bucket_out = Some(bucket);
            }
            Err(e) => warn!("could not find output bucket: {:#}; continuing", e),
        }

        if let Some(user) = &listing.user {
            match self.platform.find_authorizations_by_user(user.id).await {
                Ok(auths) => {
                    for auth in &auths {
                        info!("{} token={}", auth, auth.token);
                    }
                    listing.authorizations = auths;
                }
                Err(e) => warn!("could not find authorizations: {}; continuing", e),
            }
        }

        listing
    }
}
