use crate::domain::model::{Session, UsersPage};
use crate::domain::ports::UserDirectory;
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const LOGIN_PATH: &str = "/api/v1/login";
const USERS_LIST_PATH: &str = "/api/v1/users.list";

/// REST client for the Rocket.Chat user directory.
pub struct RocketChatClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    status: Option<String>,
    data: Option<LoginData>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    auth_token: String,
    user_id: String,
}

impl RocketChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl UserDirectory for RocketChatClient {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Session> {
        let endpoint = self.endpoint(LOGIN_PATH);
        tracing::debug!("Logging in as '{}' at {}", identifier, endpoint);

        let response = self
            .client
            .post(&endpoint)
            .json(&json!({ "user": identifier, "password": secret }))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Login response status: {}", status);

        let body: Option<LoginResponse> = response.json().await.ok();

        if !status.is_success() {
            let reason = body
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("server answered {}", status));
            return Err(ExportError::AuthError { message: reason });
        }

        match body {
            Some(LoginResponse {
                data: Some(data), ..
            }) if !data.auth_token.is_empty() => {
                tracing::info!("🔑 Logged in as '{}'", identifier);
                Ok(Session {
                    user_id: data.user_id,
                    auth_token: data.auth_token,
                })
            }
            Some(LoginResponse { status, message, .. }) => Err(ExportError::AuthError {
                message: message.unwrap_or_else(|| {
                    format!(
                        "login answered status '{}' without an auth token",
                        status.unwrap_or_default()
                    )
                }),
            }),
            None => Err(ExportError::AuthError {
                message: "login response was not valid JSON".to_string(),
            }),
        }
    }

    async fn list_users(&self, session: &Session, offset: usize, count: usize) -> Result<UsersPage> {
        let endpoint = self.endpoint(USERS_LIST_PATH);
        tracing::debug!("Requesting users at offset {} (count {})", offset, count);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("offset", offset), ("count", count)])
            .header("X-Auth-Token", &session.auth_token)
            .header("X-User-Id", &session.user_id)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("❌ users.list answered {}", status);
            return Err(ExportError::ApiStatusError {
                endpoint,
                status: status.as_u16(),
            });
        }

        let page: UsersPage = response.json().await?;
        tracing::debug!(
            "Received {} users (total {})",
            page.users.len(),
            page.total
        );
        Ok(page)
    }
}
