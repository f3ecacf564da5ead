use std::{
    fmt::{Display, Formatter},
    time::Duration,
};

use ocean_utils::config::DEFAULT_NOTIFICATION_PORT;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::DEFAULT_SUBSCRIBER_BUFFER;

// Notification service config
// ================================================================================================

#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// gRPC endpoint in the format `http://<host>[:<port>]`.
    pub endpoint: Url,
    /// Events buffered per stream subscriber. Subscribers falling further behind skip the oldest
    /// events.
    pub subscriber_buffer: usize,
    pub webhook: WebhookConfig,
}

impl Display for NotificationConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{{ endpoint: \"{}\", subscriber_buffer: {}, webhook: {} }}",
            self.endpoint, self.subscriber_buffer, self.webhook
        ))
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(format!("http://127.0.0.1:{DEFAULT_NOTIFICATION_PORT}").as_str())
                .expect("default endpoint is a valid url"),
            subscriber_buffer: DEFAULT_SUBSCRIBER_BUFFER,
            webhook: WebhookConfig::default(),
        }
    }
}

// Webhook delivery config
// ================================================================================================

#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebhookConfig {
    /// Timeout of a single delivery attempt, in milliseconds.
    pub timeout_ms: u64,
    /// Delivery attempts per event before giving up.
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds. Doubles after every failed attempt.
    pub retry_backoff_ms: u64,
}

impl WebhookConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Display for WebhookConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{{ timeout_ms: {}, max_attempts: {}, retry_backoff_ms: {} }}",
            self.timeout_ms, self.max_attempts, self.retry_backoff_ms
        ))
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            max_attempts: 3,
            retry_backoff_ms: 500,
        }
    }
}
