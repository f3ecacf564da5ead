use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use ocean_proto::{Webhook, WebhookEventKind, WebhookId};
use reqwest::header::HeaderValue;
use sha2::{Digest, Sha256};
use tracing::info;
use url::Url;

use crate::{errors::WebhookError, COMPONENT};

/// Registered webhooks, shared between the API and the dispatcher.
///
/// Registrations live in memory only and are lost on restart.
#[derive(Clone, Debug, Default)]
pub struct WebhookRegistry {
    webhooks: Arc<RwLock<BTreeMap<WebhookId, Webhook>>>,
}

impl WebhookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `endpoint` for events of `kind`.
    ///
    /// The id is derived from the endpoint and kind, so registering the same pair twice fails with
    /// [`WebhookError::AlreadyExists`]. An empty `secret` registers an unsecured webhook, any other
    /// secret must fit in an `Authorization` header.
    pub fn add(
        &self,
        endpoint: &str,
        kind: Option<WebhookEventKind>,
        secret: impl Into<String>,
    ) -> Result<Webhook, WebhookError> {
        let kind = kind.ok_or(WebhookError::UnspecifiedEventType)?;
        let endpoint = Url::parse(endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(WebhookError::UnsupportedScheme(endpoint.scheme().to_string()));
        }
        let secret = secret.into();
        if !secret.is_empty() && HeaderValue::from_str(&format!("Bearer {secret}")).is_err() {
            return Err(WebhookError::InvalidSecret);
        }

        let id = webhook_id(&endpoint, kind);
        let mut webhooks = self.write();
        if webhooks.contains_key(&id) {
            return Err(WebhookError::AlreadyExists(id));
        }

        let webhook = Webhook::new(id.clone(), endpoint, kind, secret);
        info!(target: COMPONENT, %id, endpoint = %webhook.endpoint, %kind, "Webhook added");
        webhooks.insert(id, webhook.clone());

        Ok(webhook)
    }

    /// Unregisters a webhook, returning it.
    pub fn remove(&self, id: &WebhookId) -> Result<Webhook, WebhookError> {
        if id.as_str().is_empty() {
            return Err(WebhookError::EmptyId);
        }

        let webhook = self.write().remove(id).ok_or_else(|| WebhookError::NotFound(id.clone()))?;
        info!(target: COMPONENT, %id, "Webhook removed");

        Ok(webhook)
    }

    /// Registered webhooks ordered by id. `None` lists every webhook.
    pub fn list(&self, kind: Option<WebhookEventKind>) -> Vec<Webhook> {
        self.read()
            .values()
            .filter(|webhook| kind.is_none_or(|kind| webhook.kind == kind))
            .cloned()
            .collect()
    }

    /// Webhooks to notify of an event of `kind`.
    pub fn for_kind(&self, kind: WebhookEventKind) -> Vec<Webhook> {
        self.list(Some(kind))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // The map holds no invariant spanning more than one entry, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<WebhookId, Webhook>> {
        self.webhooks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<WebhookId, Webhook>> {
        self.webhooks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Hex encoded SHA-256 of `"{kind}:{endpoint}"`.
fn webhook_id(endpoint: &Url, kind: WebhookEventKind) -> WebhookId {
    let digest = Sha256::digest(format!("{kind}:{endpoint}"));
    WebhookId::new(hex::encode(digest))
}

// TESTS
// ================================================================================================
