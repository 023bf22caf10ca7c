use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    Unauthorized,
    Forbidden,
    /// No response received at all (DNS, connect, timeout). Carries no
    /// server-supplied message by definition.
    Transport,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::BadRequest => write!(f, "BadRequest"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::Conflict => write!(f, "Conflict"),
            AppErrorKind::Unauthorized => write!(f, "Unauthorized"),
            AppErrorKind::Forbidden => write!(f, "Forbidden"),
            AppErrorKind::Transport => write!(f, "Transport"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// Structured application error shared between API adapters and stores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

/// Wire shape of a single field-validation failure returned by the backend.
#[derive(Debug, Clone, Deserialize)]
struct FieldError {
    path: String,
    message: String,
}

/// Wire shape of a non-2xx response body.
#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<FieldError>,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::NotFound,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::BadRequest,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Conflict,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Unauthorized,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Forbidden,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Transport,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::InternalError,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    /// Build an AppError from a non-2xx HTTP status and its response body.
    ///
    /// The backend returns either `{"message": "..."}` or, for field
    /// validation failures, `{"errors": [{"path", "message"}]}`. Field
    /// errors are concatenated into a multi-line human-readable message and
    /// kept individually in `field_errors`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        if !parsed.errors.is_empty() {
            let mut field_errors = HashMap::new();
            let mut lines = Vec::new();
            for e in parsed.errors {
                lines.push(format!("{}: {}", e.path, e.message));
                field_errors.insert(e.path, e.message);
            }
            return Self::validation(lines.join("\n"), field_errors);
        }

        let message = parsed
            .message
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        let kind = match status {
            400 => AppErrorKind::BadRequest,
            401 => AppErrorKind::Unauthorized,
            403 => AppErrorKind::Forbidden,
            404 => AppErrorKind::NotFound,
            409 => AppErrorKind::Conflict,
            422 => AppErrorKind::ValidationError,
            _ => AppErrorKind::InternalError,
        };

        Self {
            kind,
            message,
            field_errors: HashMap::new(),
        }
    }

    /// The server-supplied message, if this error actually came from the
    /// server. Transport failures never carry one — callers fall back to a
    /// per-operation string instead.
    pub fn server_message(&self) -> Option<&str> {
        match self.kind {
            AppErrorKind::Transport => None,
            _ if self.message.is_empty() => None,
            _ => Some(&self.message),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == AppErrorKind::NotFound
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        AppError::validation("Validation failed", field_errors)
    }
}
