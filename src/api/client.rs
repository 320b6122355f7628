use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::TaskdeskError;
use crate::session::Session;

/// Thin REST client. Each operation issues exactly one request; there are
/// no retries and no caching, and failures reach the caller unchanged.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Session,
    send_username: bool,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session) -> Result<Self, TaskdeskError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| TaskdeskError::config(format!("Invalid API base URL '{base_url}': {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http: Client::new(),
            base_url: base,
            session,
            send_username: true,
        })
    }

    /// Whether list queries carry the advisory `username` parameter decoded
    /// from the token.
    pub fn with_username_param(mut self, enabled: bool) -> Self {
        self.send_username = enabled;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn username_param(&self) -> Option<(&'static str, String)> {
        if !self.send_username {
            return None;
        }
        self.session.current_username().map(|u| ("username", u))
    }

    /// Start a request; attaches `Authorization: Bearer` when the session
    /// currently holds a token.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, TaskdeskError> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TaskdeskError::config(format!("Invalid request path '{path}': {e}")))?;
        let token = self.session.token();
        tracing::debug!(%method, %url, authenticated = token.is_some(), "sending request");
        let builder = self.http.request(method, url);
        Ok(match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, TaskdeskError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%status, "backend rejected request");
        Err(TaskdeskError::from_status(status, &body))
    }

    /// Send and decode the JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, TaskdeskError> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| TaskdeskError::decode(format!("Unexpected response body: {e}")))
    }

    /// Send and discard whatever body comes back.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<(), TaskdeskError> {
        self.send(builder).await?;
        Ok(())
    }
}
