#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{NotesError, Result};
use crate::utils::validation::{validate_not_blank, validate_path, validate_url, Validate};
use std::path::PathBuf;
use toml_config::TomlConfig;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const APP_DIR: &str = "quick-notes";
const LOG_FORMATS: [&str; 2] = ["compact", "json"];

/// 命令列參數優先，其次是 TOML 檔案
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub session_dir: Option<String>,
}

/// 合併後的執行期配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub service_url: String,
    pub anon_key: String,
    pub session_path: String,
    pub timeout_seconds: u64,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl AppConfig {
    /// 只合併不驗證；命令列覆蓋後再對結果呼叫 `validate`
    pub fn resolve(file: TomlConfig, overrides: Overrides) -> Result<Self> {
        let service_url = overrides
            .url
            .or(file.service.url.clone())
            .ok_or_else(|| NotesError::ConfigError {
                message: "No service URL configured (use --url or QUICK_NOTES_URL)".to_string(),
            })?;
        let anon_key = overrides
            .anon_key
            .or(file.service.anon_key.clone())
            .ok_or_else(|| NotesError::ConfigError {
                message: "No anon key configured (use --anon-key or QUICK_NOTES_ANON_KEY)"
                    .to_string(),
            })?;
        let session_path = overrides
            .session_dir
            .or(file.session.as_ref().map(|s| s.path.clone()))
            .unwrap_or_else(default_session_dir);

        Ok(Self {
            service_url,
            anon_key,
            session_path,
            timeout_seconds: file
                .service
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            log_level: file.log_level().map(str::to_string),
            log_format: file.log_format().map(str::to_string),
        })
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.as_deref() == Some("json")
    }

    /// 指定的檔案必須存在；未指定時才找預設位置
    pub fn load_file(path: Option<&str>) -> Result<TomlConfig> {
        match path {
            Some(path) => TomlConfig::from_file(path),
            None => match default_config_file() {
                Some(path) if path.exists() => {
                    tracing::debug!("Using config file {}", path.display());
                    TomlConfig::from_file(path)
                }
                _ => Ok(TomlConfig::default()),
            },
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service.url", &self.service_url)?;
        validate_not_blank("service.anon_key", &self.anon_key)?;
        validate_path("session.path", &self.session_path)?;
        if self.timeout_seconds == 0 {
            return Err(NotesError::InvalidConfigValueError {
                field: "service.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }
        if let Some(format) = &self.log_format {
            if !LOG_FORMATS.contains(&format.as_str()) {
                return Err(NotesError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        LOG_FORMATS.join(", ")
                    ),
                });
            }
        }
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn service_url(&self) -> &str {
        &self.service_url
    }

    fn anon_key(&self) -> &str {
        &self.anon_key
    }

    fn session_path(&self) -> &str {
        &self.session_path
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

fn default_session_dir() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .to_string_lossy()
        .into_owned()
}
