use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Service error ({status}): {message}")]
    ServiceError { status: u16, message: String },

    #[error("Authentication error: {message}")]
    AuthError { message: String },

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Authentication,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NotesError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NotesError::ApiError(_) => ErrorCategory::Network,
            NotesError::ServiceError { .. } | NotesError::SerializationError(_) => {
                ErrorCategory::Service
            }
            NotesError::AuthError { .. } | NotesError::NotSignedIn => {
                ErrorCategory::Authentication
            }
            NotesError::ConfigError { .. }
            | NotesError::ConfigValidationError { .. }
            | NotesError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            NotesError::NoteNotFound(_) | NotesError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            NotesError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network | ErrorCategory::Service => ErrorSeverity::Medium,
            ErrorCategory::Authentication | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給使用者的修正建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NotesError::ApiError(_) => "Check your network connection and the service URL",
            NotesError::ServiceError { status, .. } if *status == 401 || *status == 403 => {
                "Your session may have expired, run `quick-notes login` again"
            }
            NotesError::ServiceError { .. } => "Try again later or check the service status",
            NotesError::SerializationError(_) => "The service returned unexpected data",
            NotesError::AuthError { .. } => "Check your email and password",
            NotesError::NotSignedIn => "Run `quick-notes login <email>` first",
            NotesError::NoteNotFound(_) => "Run `quick-notes list` to see existing notes",
            NotesError::ConfigError { .. }
            | NotesError::ConfigValidationError { .. }
            | NotesError::InvalidConfigValueError { .. } => {
                "Check the config file or the QUICK_NOTES_URL / QUICK_NOTES_ANON_KEY variables"
            }
            NotesError::ValidationError { .. } => "Fix the input and try again",
            NotesError::IoError(_) => "Check file permissions for the session directory",
        }
    }

    /// 橫幅訊息，對應網頁版的錯誤提示
    pub fn user_friendly_message(&self) -> String {
        match self {
            NotesError::ServiceError { message, .. } => format!("Request failed: {}", message),
            NotesError::AuthError { message } => message.clone(),
            NotesError::ValidationError { message } => message.clone(),
            NotesError::ApiError(e) if e.is_timeout() => "The service did not respond in time".to_string(),
            NotesError::ApiError(_) => "Could not reach the notes service".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;
