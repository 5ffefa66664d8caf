use super::HttpPlatform;
use async_trait::async_trait;
use platdemo_core::traits::QueryService;
use platdemo_core::{Authorization, CoreError, PlatformId, Result};
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde::Serialize;

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[async_trait]
impl QueryService for HttpPlatform {
    async fn query(
        &self,
        credential: &Authorization,
        org_id: PlatformId,
        flux: &str,
    ) -> Result<String> {
        let request = self
            .request_with_token(Method::POST, "api/v2/query", &credential.token)?
            .query(&[("orgID", org_id.to_string())])
            .header(ACCEPT, "application/csv")
            .json(&QueryRequest {
                query: flux,
                kind: "flux",
            });
        let response = Self::send(request, StatusCode::OK).await?;

        response
            .text()
            .await
            .map_err(|e| CoreError::transport(e.to_string()))
    }
}
