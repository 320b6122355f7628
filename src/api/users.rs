use reqwest::Method;

use crate::api::ApiClient;
use crate::error::TaskdeskError;
use crate::models::{PasswordChange, ProfileUpdate, User};

impl ApiClient {
    pub async fn current_user(&self) -> Result<User, TaskdeskError> {
        self.fetch(self.request(Method::GET, "users/me")?).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, TaskdeskError> {
        self.fetch(self.request(Method::PUT, "users/me")?.json(update))
            .await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), TaskdeskError> {
        self.execute(self.request(Method::PUT, "users/me/password")?.json(change))
            .await
    }
}
