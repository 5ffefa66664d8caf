use super::HttpPlatform;
use async_trait::async_trait;
use platdemo_core::traits::TaskService;
use platdemo_core::{Authorization, NewTask, PlatformId, Result, Task};
use reqwest::{Method, StatusCode};
use serde::Deserialize;

#[derive(Deserialize)]
struct Tasks {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[async_trait]
impl TaskService for HttpPlatform {
    async fn create_task(&self, credential: &Authorization, task: NewTask) -> Result<Task> {
        let request = self
            .request_with_token(Method::POST, "api/v2/tasks", &credential.token)?
            .json(&task);
        let response = Self::send(request, StatusCode::CREATED).await?;
        Self::decode(response).await
    }

    async fn find_tasks_by_org(&self, org_id: PlatformId) -> Result<Vec<Task>> {
        let request = self
            .request(Method::GET, "api/v2/tasks")?
            .query(&[("orgID", org_id.to_string())]);
        let response = Self::send(request, StatusCode::OK).await?;
        let Tasks { tasks } = Self::decode(response).await?;
        Ok(tasks)
    }

    async fn delete_task(&self, id: PlatformId) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("api/v2/tasks/{}", id))?;
        Self::send(request, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}
