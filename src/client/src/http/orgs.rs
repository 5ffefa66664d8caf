use super::HttpPlatform;
use async_trait::async_trait;
use platdemo_core::traits::OrganizationService;
use platdemo_core::{CoreError, Organization, PlatformId, Result};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct CreateOrganization<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct Organizations {
    #[serde(default)]
    orgs: Vec<Organization>,
}

#[async_trait]
impl OrganizationService for HttpPlatform {
    async fn create_organization(&self, name: &str) -> Result<Organization> {
        let request = self
            .request(Method::POST, "api/v2/orgs")?
            .json(&CreateOrganization { name });
        let response = Self::send(request, StatusCode::CREATED).await?;
        Self::decode(response).await
    }

    async fn find_organization_by_name(&self, name: &str) -> Result<Organization> {
        let request = self
            .request(Method::GET, "api/v2/orgs")?
            .query(&[("org", name)]);
        let response = Self::send(request, StatusCode::OK).await?;
        let Organizations { orgs } = Self::decode(response).await?;

        orgs.into_iter()
            .find(|o| o.name == name)
            .ok_or_else(|| CoreError::not_found(format!("org {:?}", name)))
    }

    async fn delete_organization(&self, id: PlatformId) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("api/v2/orgs/{}", id))?;
        Self::send(request, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}
