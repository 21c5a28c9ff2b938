//! HTTP auth backend.

use async_trait::async_trait;
use raffine_core::auth::{AuthService, Session};
use raffine_core::error::Result;

use crate::client::ApiClient;
use crate::dto::{AuthResponseDto, LoginRequest, RegisterRequest};

pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let request = self.api.post("auth/login").json(&LoginRequest { email, password });
        let response: AuthResponseDto = self.api.send_json(request, "Login failed").await?;
        let session = response.into_session();
        tracing::info!(user = %session.identity.id, "Logged in");
        Ok(session)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let request = self
            .api
            .post("auth/register")
            .json(&RegisterRequest { name, email, password });
        let response: AuthResponseDto = self.api.send_json(request, "Registration failed").await?;
        let session = response.into_session();
        tracing::info!(user = %session.identity.id, "Registered");
        Ok(session)
    }
}
