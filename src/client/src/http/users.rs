use super::HttpPlatform;
use async_trait::async_trait;
use platdemo_core::traits::UserService;
use platdemo_core::{CoreError, PlatformId, Result, User};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct CreateUser<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct Users {
    #[serde(default)]
    users: Vec<User>,
}

#[async_trait]
impl UserService for HttpPlatform {
    async fn create_user(&self, name: &str) -> Result<User> {
        let request = self
            .request(Method::POST, "api/v2/users")?
            .json(&CreateUser { name });
        let response = Self::send(request, StatusCode::CREATED).await?;
        Self::decode(response).await
    }

    async fn find_user_by_name(&self, name: &str) -> Result<User> {
        let request = self
            .request(Method::GET, "api/v2/users")?
            .query(&[("name", name)]);
        let response = Self::send(request, StatusCode::OK).await?;
        let Users { users } = Self::decode(response).await?;

        users
            .into_iter()
            .find(|u| u.name == name)
            .ok_or_else(|| CoreError::not_found(format!("user {:?}", name)))
    }

    async fn delete_user(&self, id: PlatformId) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("api/v2/users/{}", id))?;
        Self::send(request, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}
