use reqwest::Method;

use crate::api::ApiClient;
use crate::error::TaskdeskError;
use crate::models::{Role, User};

impl ApiClient {
    pub async fn users(&self) -> Result<Vec<User>, TaskdeskError> {
        self.fetch(self.request(Method::GET, "admin/users")?).await
    }

    pub async fn user(&self, id: i64) -> Result<User, TaskdeskError> {
        self.fetch(self.request(Method::GET, &format!("admin/users/{id}"))?)
            .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), TaskdeskError> {
        self.execute(self.request(Method::DELETE, &format!("admin/users/{id}"))?)
            .await
    }

    pub async fn update_user_role(&self, id: i64, role: Role) -> Result<(), TaskdeskError> {
        let builder = self
            .request(Method::PUT, &format!("admin/users/{id}/role"))?
            .query(&[("role", role.as_str())]);
        self.execute(builder).await
    }
}
