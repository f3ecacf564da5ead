use std::pin::Pin;

use ocean_proto::{
    generated::v1::{
        notification_service_server::NotificationService, AddWebhookRequest, AddWebhookResponse,
        ListWebhooksRequest, ListWebhooksResponse, RemoveWebhookRequest, RemoveWebhookResponse,
        TransactionNotificationsRequest, TransactionNotificationsResponse,
        UtxosNotificationsRequest, UtxosNotificationsResponse,
    },
    WebhookEventKind, WebhookId,
};
use ocean_utils::formatting::format_array;
use tokio_stream::{Stream, StreamExt};
use tonic::{Request, Response, Status};
use tracing::{debug, info, instrument};

use crate::{errors::WebhookError, hub::EventHub, webhooks::registry::WebhookRegistry, COMPONENT};

type ResponseStream<T> = Pin<Box<dyn Stream<Item = Result<T, Status>> + Send>>;

// NOTIFICATION API
// ================================================================================================

/// gRPC surface of the notification service.
pub struct NotificationApi {
    hub: EventHub,
    registry: WebhookRegistry,
}

impl NotificationApi {
    pub fn new(hub: EventHub, registry: WebhookRegistry) -> Self {
        Self { hub, registry }
    }
}

#[tonic::async_trait]
impl NotificationService for NotificationApi {
    type TransactionNotificationsStream = ResponseStream<TransactionNotificationsResponse>;
    type UtxosNotificationsStream = ResponseStream<UtxosNotificationsResponse>;

    #[instrument(target = COMPONENT, name = "notification:transaction_notifications", skip_all, err)]
    async fn transaction_notifications(
        &self,
        _request: Request<TransactionNotificationsRequest>,
    ) -> Result<Response<Self::TransactionNotificationsStream>, Status> {
        let stream = self.hub.transaction_stream().map(|event| {
            debug!(
                target: COMPONENT,
                txid = %event.txid,
                accounts = %format_array(&event.account_names),
                "Streaming transaction event"
            );
            Ok(TransactionNotificationsResponse::from(event))
        });
        info!(
            target: COMPONENT,
            subscribers = self.hub.transaction_subscribers(),
            "Transaction subscriber connected"
        );

        Ok(Response::new(Box::pin(stream)))
    }

    #[instrument(target = COMPONENT, name = "notification:utxos_notifications", skip_all, err)]
    async fn utxos_notifications(
        &self,
        _request: Request<UtxosNotificationsRequest>,
    ) -> Result<Response<Self::UtxosNotificationsStream>, Status> {
        let stream = self.hub.utxo_stream().map(|event| {
            debug!(
                target: COMPONENT,
                outpoints = %format_array(event.utxos.iter().map(|utxo| &utxo.outpoint)),
                "Streaming utxo event"
            );
            Ok(UtxosNotificationsResponse::from(event))
        });
        info!(
            target: COMPONENT,
            subscribers = self.hub.utxo_subscribers(),
            "Utxo subscriber connected"
        );

        Ok(Response::new(Box::pin(stream)))
    }

    #[instrument(target = COMPONENT, name = "notification:add_webhook", skip_all, err)]
    async fn add_webhook(
        &self,
        request: Request<AddWebhookRequest>,
    ) -> Result<Response<AddWebhookResponse>, Status> {
        let request = request.into_inner();
        debug!(
            target: COMPONENT,
            endpoint = %request.endpoint,
            event_type = request.event_type,
            is_secured = !request.secret.is_empty(),
        );

        let kind = WebhookEventKind::from_proto(request.event_type).map_err(WebhookError::from)?;
        let webhook = self.registry.add(&request.endpoint, kind, request.secret)?;

        Ok(Response::new(AddWebhookResponse { id: webhook.id.into() }))
    }

    #[instrument(target = COMPONENT, name = "notification:remove_webhook", skip_all, err)]
    async fn remove_webhook(
        &self,
        request: Request<RemoveWebhookRequest>,
    ) -> Result<Response<RemoveWebhookResponse>, Status> {
        let id = WebhookId::new(request.into_inner().id);
        debug!(target: COMPONENT, %id);

        self.registry.remove(&id)?;

        Ok(Response::new(RemoveWebhookResponse {}))
    }

    #[instrument(target = COMPONENT, name = "notification:list_webhooks", skip_all, err)]
    async fn list_webhooks(
        &self,
        request: Request<ListWebhooksRequest>,
    ) -> Result<Response<ListWebhooksResponse>, Status> {
        let kind = WebhookEventKind::from_proto(request.into_inner().event_type)
            .map_err(WebhookError::from)?;

        let webhook_info = self.registry.list(kind).iter().map(Into::into).collect();

        Ok(Response::new(ListWebhooksResponse { webhook_info }))
    }
}
