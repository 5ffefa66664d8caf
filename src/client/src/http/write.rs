use super::HttpPlatform;
use async_trait::async_trait;
use platdemo_core::traits::PointWriter;
use platdemo_core::{Authorization, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};

#[async_trait]
impl PointWriter for HttpPlatform {
    async fn write_lines(
        &self,
        credential: &Authorization,
        org: &str,
        bucket: &str,
        lines: &str,
    ) -> Result<()> {
        let request = self
            .request_with_token(Method::POST, "api/v2/write", &credential.token)?
            .query(&[("org", org), ("bucket", bucket)])
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(lines.to_string());
        Self::send(request, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}
