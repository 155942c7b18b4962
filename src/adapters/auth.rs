use crate::adapters::http::{check_status, ServiceClient};
use crate::core::{AuthProvider, Session, SignUpOutcome, User};
use crate::utils::error::{NotesError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// token 端點的回應；註冊需確認信箱時只會回傳使用者本身
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: Option<User>,
    id: Option<String>,
    email: Option<String>,
}

impl TokenResponse {
    fn expiry(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match (self.expires_at, self.expires_in) {
            (Some(at), _) => DateTime::from_timestamp(at, 0),
            (None, Some(seconds)) => Some(now + Duration::seconds(seconds)),
            (None, None) => None,
        }
    }

    fn into_session(self) -> Option<Session> {
        let expires_at = self.expiry(Utc::now());
        Some(Session {
            access_token: self.access_token?,
            refresh_token: self.refresh_token,
            token_type: self.token_type.unwrap_or_else(|| "bearer".to_string()),
            expires_at,
            user: self.user?,
        })
    }

    fn into_user(self) -> Option<User> {
        self.user.or(match self.id {
            Some(id) => Some(User {
                id,
                email: self.email,
            }),
            None => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RestAuthProvider {
    client: ServiceClient,
}

impl RestAuthProvider {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    async fn post_credentials(&self, path: &str, email: &str, password: &str) -> Result<TokenResponse> {
        let url = self.client.endpoint(path)?;
        let response = self
            .client
            .request(Method::POST, url)
            .json(&Credentials { email, password })
            .send()
            .await?;

        let response = check_status(response).await.map_err(into_auth_error)?;
        Ok(response.json().await?)
    }
}

/// 驗證端點的 4xx 都視為帳密或帳號問題
fn into_auth_error(error: NotesError) -> NotesError {
    match error {
        NotesError::ServiceError { status, message } if (400..500).contains(&status) => {
            NotesError::AuthError { message }
        }
        other => other,
    }
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        let response = self.post_credentials("auth/v1/signup", email, password).await?;

        if response.access_token.is_some() {
            let session = response.into_session().ok_or_else(|| NotesError::AuthError {
                message: "Sign up returned an incomplete session".to_string(),
            })?;
            return Ok(SignUpOutcome::SignedIn(session));
        }

        let user = response.into_user().ok_or_else(|| NotesError::AuthError {
            message: "Sign up returned no user".to_string(),
        })?;
        Ok(SignUpOutcome::ConfirmationPending(user))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .post_credentials("auth/v1/token?grant_type=password", email, password)
            .await?;

        response.into_session().ok_or_else(|| NotesError::AuthError {
            message: "Sign in returned no session".to_string(),
        })
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        let url = self.client.endpoint("auth/v1/logout")?;
        let response = self
            .client
            .request_with_token(Method::POST, url, &session.access_token)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}
