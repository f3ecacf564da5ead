use ocean_proto::{errors::ConversionError, WebhookId};
use ocean_utils::errors::ApiError;
use thiserror::Error;
use tonic::Status;

// WEBHOOK ERRORS
// =================================================================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WebhookError {
    #[error("invalid webhook endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("unsupported webhook endpoint scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),
    #[error("invalid webhook event type: {0}")]
    InvalidEventType(#[from] ConversionError),
    #[error("webhook event type must be specified")]
    UnspecifiedEventType,
    #[error("webhook secret must be printable ascii without line breaks")]
    InvalidSecret,
    #[error("webhook id must not be empty")]
    EmptyId,
    #[error("webhook {0} already exists")]
    AlreadyExists(WebhookId),
    #[error("webhook {0} not found")]
    NotFound(WebhookId),
}

impl From<WebhookError> for Status {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::AlreadyExists(_) => Status::already_exists(err.to_string()),
            WebhookError::NotFound(_) => Status::not_found(err.to_string()),
            WebhookError::InvalidEndpoint(_)
            | WebhookError::UnsupportedScheme(_)
            | WebhookError::InvalidEventType(_)
            | WebhookError::UnspecifiedEventType
            | WebhookError::InvalidSecret
            | WebhookError::EmptyId => Status::invalid_argument(err.to_string()),
        }
    }
}

// DELIVERY ERRORS
// =================================================================================================

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint responded with status {status}")]
    Rejected { status: u16 },
    #[error("failed to serialize the notification payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

// SERVER ERRORS
// =================================================================================================

#[derive(Debug, Error)]
pub enum NotificationServerError {
    #[error("api error: {0}")]
    ApiError(#[from] ApiError),
    #[error("failed to build the webhook http client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("task {task} failed: {source}")]
    TaskFailed {
        task: &'static str,
        #[source]
        source: tokio::task::JoinError,
    },
    #[error("task {0} exited unexpectedly")]
    TaskExited(&'static str),
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::*;

    #[test]
    fn webhook_errors_map_to_status_codes() {
        let id = WebhookId::new("abc");

        assert_eq!(Status::from(WebhookError::AlreadyExists(id.clone())).code(), Code::AlreadyExists);
        assert_eq!(Status::from(WebhookError::NotFound(id)).code(), Code::NotFound);
        assert_eq!(Status::from(WebhookError::UnspecifiedEventType).code(), Code::InvalidArgument);
        assert_eq!(Status::from(WebhookError::InvalidSecret).code(), Code::InvalidArgument);
        assert_eq!(
            Status::from(WebhookError::UnsupportedScheme("ftp".to_string())).code(),
            Code::InvalidArgument
        );
    }
}
