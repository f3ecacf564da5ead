use ocean_proto::{TransactionEvent, UtxoEvent, Webhook, WebhookEventKind};
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Serialize;
use tokio::sync::{
    broadcast::{self, error::RecvError},
    watch,
};
use tracing::{debug, error, info, instrument, warn};

use super::{
    payload::{TransactionPayload, UtxoPayload},
    registry::WebhookRegistry,
};
use crate::{
    config::WebhookConfig,
    errors::{DeliveryError, NotificationServerError},
    hub::EventHub,
    COMPONENT,
};

// WEBHOOK DISPATCHER
// ================================================================================================

/// Posts every published event to the webhooks registered for its class.
///
/// Each delivery runs in its own task, so a slow or unreachable endpoint never delays the others.
/// Failed attempts are retried with exponential backoff; an event that could not be delivered
/// after the last attempt is logged and dropped.
pub struct WebhookDispatcher {
    registry: WebhookRegistry,
    client: Client,
    config: WebhookConfig,
    transactions: broadcast::Receiver<TransactionEvent>,
    utxos: broadcast::Receiver<UtxoEvent>,
    closed: watch::Receiver<bool>,
}

impl WebhookDispatcher {
    /// Subscribes to `hub` right away: events published after this call are delivered once
    /// [`run`](Self::run) is polled.
    pub fn new(
        registry: WebhookRegistry,
        config: WebhookConfig,
        hub: &EventHub,
    ) -> Result<Self, NotificationServerError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(NotificationServerError::HttpClient)?;

        Ok(Self {
            registry,
            client,
            config,
            transactions: hub.subscribe_transactions(),
            utxos: hub.subscribe_utxos(),
            closed: hub.subscribe_closed(),
        })
    }

    /// Runs until the hub is closed or every publisher of the hub is dropped.
    ///
    /// Deliveries already in flight keep retrying in their own tasks.
    pub async fn run(mut self) -> Result<(), NotificationServerError> {
        info!(target: COMPONENT, config = %self.config, "Webhook dispatcher started");

        while !*self.closed.borrow_and_update() {
            tokio::select! {
                event = self.transactions.recv() => match event {
                    Ok(event) => {
                        self.dispatch(event.webhook_kind(), &TransactionPayload::from(&event));
                    },
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(target: COMPONENT, skipped, "Webhook dispatcher lagged, transaction events dropped");
                    },
                    Err(RecvError::Closed) => break,
                },
                event = self.utxos.recv() => match event {
                    Ok(event) => self.dispatch(event.webhook_kind(), &UtxoPayload::from(&event)),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(target: COMPONENT, skipped, "Webhook dispatcher lagged, utxo events dropped");
                    },
                    Err(RecvError::Closed) => break,
                },
                // An error means the hub is gone, which the event branches observe as well.
                changed = self.closed.changed() => if changed.is_err() {
                    break;
                },
            }
        }

        info!(target: COMPONENT, "Event hub closed, webhook dispatcher stopped");
        Ok(())
    }

    fn dispatch(&self, kind: WebhookEventKind, payload: &impl Serialize) {
        let webhooks = self.registry.for_kind(kind);
        if webhooks.is_empty() {
            return;
        }

        let body = match encode(payload) {
            Ok(body) => body,
            Err(err) => {
                error!(target: COMPONENT, %kind, %err, "Dropping event");
                return;
            },
        };

        for webhook in webhooks {
            tokio::spawn(deliver(self.client.clone(), webhook, body.clone(), self.config.clone()));
        }
    }
}

fn encode(payload: &impl Serialize) -> Result<Vec<u8>, DeliveryError> {
    Ok(serde_json::to_vec(payload)?)
}

// DELIVERY
// ================================================================================================

#[instrument(target = COMPONENT, name = "webhook.deliver", skip_all, fields(id = %webhook.id, endpoint = %webhook.endpoint))]
async fn deliver(client: Client, webhook: Webhook, body: Vec<u8>, config: WebhookConfig) {
    let attempts = config.max_attempts.max(1);
    let mut backoff = config.retry_backoff();

    for attempt in 1..=attempts {
        match post(&client, &webhook, body.clone()).await {
            Ok(()) => {
                debug!(target: COMPONENT, attempt, "Webhook notified");
                return;
            },
            Err(err) if attempt < attempts => {
                warn!(target: COMPONENT, attempt, %err, retry_in = ?backoff, "Webhook delivery failed");
                tokio::time::sleep(backoff).await;
                backoff = backoff.saturating_mul(2);
            },
            Err(err) => {
                error!(target: COMPONENT, attempts, %err, "Webhook delivery failed, giving up");
            },
        }
    }
}

async fn post(client: &Client, webhook: &Webhook, body: Vec<u8>) -> Result<(), DeliveryError> {
    let mut request = client
        .post(webhook.endpoint.clone())
        .header(CONTENT_TYPE, "application/json")
        .body(body);
    if let Some(secret) = webhook.secret() {
        request = request.bearer_auth(secret);
    }

    let status = request.send().await?.status();
    if !status.is_success() {
        return Err(DeliveryError::Rejected { status: status.as_u16() });
    }

    Ok(())
}

// TESTS
// ================================================================================================
