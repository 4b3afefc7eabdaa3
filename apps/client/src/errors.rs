use serde_json::Value;
use thiserror::Error;

/// Client-level error type.
///
/// Every variant is recovered at the view boundary and rendered through
/// [`AppError::user_message`]; none of them terminates the process.
#[derive(Debug, Error)]
pub enum AppError {
    /// The remote service answered with a failure.
    #[error("Server error: {message}")]
    Remote { status: Option<u16>, message: String },

    /// The request never produced a usable response (connect, timeout, decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local input was missing or malformed; no request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The access gate rejected a view or record scope.
    #[error("Forbidden")]
    Forbidden,

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        AppError::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// True for the network-or-server branch of the taxonomy.
    pub fn is_network_or_server(&self) -> bool {
        matches!(self, AppError::Remote { .. } | AppError::Http(_))
    }

    /// Text for the dismissible message shown at the view boundary.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Remote { message, .. } => message.clone(),
            AppError::Http(e) => {
                tracing::warn!("HTTP error: {e}");
                if e.is_timeout() {
                    "The server did not respond in time".to_string()
                } else if e.is_decode() {
                    "The server sent an unexpected response".to_string()
                } else {
                    "Could not reach the server".to_string()
                }
            }
            AppError::Validation(msg) => msg.clone(),
            AppError::Forbidden => "This option is not available".to_string(),
            AppError::Session(msg) => {
                tracing::warn!("Session storage error: {msg}");
                "Your session could not be saved on this device".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal error occurred".to_string()
            }
        }
    }
}

/// Pulls a displayable message out of an error body.
///
/// Accepts `{"detail": "..."}`, `{"message": "..."}`, `{"error": {"message": "..."}}` and the
/// list form of `detail` used for request validation failures.
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "message", "error"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find_map(message_from_value)
}

fn message_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("msg"))
            .and_then(message_from_value),
        Value::Array(items) => items.iter().find_map(message_from_value),
        _ => None,
    }
}
