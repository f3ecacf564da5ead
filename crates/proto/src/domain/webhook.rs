use std::fmt::{Debug, Display, Formatter};

use url::Url;

use crate::{domain::event_kind::WebhookEventKind, generated::v1 as proto};

// WEBHOOK ID
// ================================================================================================

/// Identifier of a registered webhook.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WebhookId(String);

impl WebhookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for WebhookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<WebhookId> for String {
    fn from(value: WebhookId) -> Self {
        value.0
    }
}

// WEBHOOK
// ================================================================================================

/// An http(s) endpoint notified of every event of one class.
#[derive(Clone, PartialEq, Eq)]
pub struct Webhook {
    pub id: WebhookId,
    pub endpoint: Url,
    pub kind: WebhookEventKind,
    secret: Option<String>,
}

impl Webhook {
    /// An empty secret registers an unsecured webhook.
    pub fn new(
        id: WebhookId,
        endpoint: Url,
        kind: WebhookEventKind,
        secret: impl Into<String>,
    ) -> Self {
        let secret = secret.into();
        let secret = (!secret.is_empty()).then_some(secret);

        Self { id, endpoint, kind, secret }
    }

    pub fn is_secured(&self) -> bool {
        self.secret.is_some()
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }
}

impl Debug for Webhook {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Webhook")
            .field("id", &self.id)
            .field("endpoint", &self.endpoint.as_str())
            .field("kind", &self.kind)
            .field("is_secured", &self.is_secured())
            .finish()
    }
}

impl From<&Webhook> for proto::WebhookInfo {
    fn from(value: &Webhook) -> Self {
        Self {
            id: value.id.to_string(),
            endpoint: value.endpoint.to_string(),
            is_secured: value.is_secured(),
        }
    }
}

impl From<Webhook> for proto::WebhookInfo {
    fn from(value: Webhook) -> Self {
        (&value).into()
    }
}

// TESTS
// ================================================================================================
