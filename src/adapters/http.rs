use crate::core::ConfigProvider;
use crate::utils::error::{NotesError, Result};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use url::Url;

/// 託管服務的共用連線資訊：base URL、匿名金鑰與目前的 access token
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: Url,
    anon_key: String,
    access_token: Option<String>,
}

impl ServiceClient {
    pub fn new(base_url: &str, anon_key: &str, timeout_seconds: u64) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| NotesError::ConfigError {
            message: format!("Invalid service URL '{}': {}", base_url, e),
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url,
            anon_key: anon_key.to_string(),
            access_token: None,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.service_url(),
            config.anon_key(),
            config.timeout_seconds(),
        )
    }

    /// 登入後以使用者 token 取代匿名金鑰
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| NotesError::ConfigError {
            message: format!("Invalid endpoint path '{}': {}", path, e),
        })
    }

    pub fn request(&self, method: reqwest::Method, url: Url) -> RequestBuilder {
        self.authorized(self.client.request(method, url), self.access_token.as_deref())
    }

    pub fn request_with_token(&self, method: reqwest::Method, url: Url, token: &str) -> RequestBuilder {
        self.authorized(self.client.request(method, url), Some(token))
    }

    fn authorized(&self, builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let bearer = token.unwrap_or(&self.anon_key);
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", bearer))
    }
}

/// 非 2xx 回應轉成 ServiceError，訊息取自回應內容
pub async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string()
    });

    tracing::debug!("Service returned {}: {}", status, body);
    Err(NotesError::ServiceError {
        status: status.as_u16(),
        message,
    })
}

pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}
