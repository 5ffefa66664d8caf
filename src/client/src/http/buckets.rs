use super::HttpPlatform;
use async_trait::async_trait;
use platdemo_core::traits::BucketService;
use platdemo_core::{Bucket, CoreError, NewBucket, PlatformId, Result};
use reqwest::{Method, StatusCode};
use serde::Deserialize;

#[derive(Deserialize)]
struct Buckets {
    #[serde(default)]
    buckets: Vec<Bucket>,
}

#[async_trait]
impl BucketService for HttpPlatform {
    async fn create_bucket(&self, bucket: NewBucket) -> Result<Bucket> {
        let request = self.request(Method::POST, "api/v2/buckets")?.json(&bucket);
        let response = Self::send(request, StatusCode::CREATED).await?;
        Self::decode(response).await
    }

    async fn find_bucket_by_name(&self, org_name: &str, name: &str) -> Result<Bucket> {
        let request = self
            .request(Method::GET, "api/v2/buckets")?
            .query(&[("org", org_name), ("name", name)]);
        let response = Self::send(request, StatusCode::OK).await?;
        let Buckets { buckets } = Self::decode(response).await?;

        buckets
            .into_iter()
            .find(|b| b.name == name)
            .ok_or_else(|| CoreError::not_found(format!("bucket {:?} in org {:?}", name, org_name)))
    }

    async fn delete_bucket(&self, id: PlatformId) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("api/v2/buckets/{}", id))?;
        Self::send(request, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}
