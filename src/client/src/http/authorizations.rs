use super::HttpPlatform;
use async_trait::async_trait;
use platdemo_core::traits::AuthorizationService;
use platdemo_core::{Authorization, NewAuthorization, PlatformId, Result};
use reqwest::{Method, StatusCode};
use serde::Deserialize;

#[derive(Deserialize)]
struct Authorizations {
    #[serde(default)]
    authorizations: Vec<Authorization>,
}

#[async_trait]
impl AuthorizationService for HttpPlatform {
    async fn create_authorization(&self, auth: NewAuthorization) -> Result<Authorization> {
        let request = self.request(Method::POST, "api/v2/authorizations")?.json(&auth);
        let response = Self::send(request, StatusCode::CREATED).await?;
        Self::decode(response).await
    }

    async fn find_authorizations_by_user(&self, user_id: PlatformId) -> Result<Vec<Authorization>> {
        let request = self
            .request(Method::GET, "api/v2/authorizations")?
            .query(&[("userID", user_id.to_string())]);
        let response = Self::send(request, StatusCode::OK).await?;
        let Authorizations { authorizations } = Self::decode(response).await?;
        Ok(authorizations)
    }

    async fn delete_authorization(&self, id: PlatformId) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("api/v2/authorizations/{}", id))?;
        Self::send(request, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}
