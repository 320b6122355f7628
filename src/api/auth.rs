use reqwest::Method;

use crate::api::ApiClient;
use crate::error::TaskdeskError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};

impl ApiClient {
    /// `POST /auth/login`; on success the returned token becomes the
    /// session's token.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, TaskdeskError> {
        let response: AuthResponse = self
            .fetch(self.request(Method::POST, "auth/login")?.json(credentials))
            .await?;
        self.session().set_token(&response.token)?;
        tracing::info!(username = %credentials.username, "logged in");
        Ok(response)
    }

    /// `POST /auth/register`. The caller validates the request first.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), TaskdeskError> {
        self.execute(self.request(Method::POST, "auth/register")?.json(request))
            .await
    }

    /// Forget the local token. No request is made.
    pub fn logout(&self) -> Result<(), TaskdeskError> {
        self.session().clear_token()
    }
}
