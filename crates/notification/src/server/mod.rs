use std::{collections::HashMap, future::Future, net::SocketAddr};

use ocean_proto::generated::v1::notification_service_server::NotificationServiceServer;
use ocean_utils::{errors::ApiError, grpc::UrlExt, tracing::grpc::notification_trace_fn};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tracing::info;

use crate::{
    config::NotificationConfig, errors::NotificationServerError, hub::EventHub,
    webhooks::WebhookDispatcher, WebhookRegistry, COMPONENT,
};

mod api;


pub use api::NotificationApi;

/// Represents an initialized notification service where the gRPC listener is bound, but not yet
/// actively responding to requests.
///
/// Separating the binding from serving lets an embedding process grab the [`EventHub`] and start
/// publishing events, or connect clients, before [`serve`](Self::serve) is awaited. Incoming
/// connections are queued until then.
pub struct NotificationServer {
    listener: TcpListener,
    hub: EventHub,
    registry: WebhookRegistry,
    dispatcher: WebhookDispatcher,
}

impl NotificationServer {
    /// Binds the configured endpoint.
    pub async fn init(config: NotificationConfig) -> Result<Self, NotificationServerError> {
        let addr = config.endpoint.to_socket()?;
        let listener = TcpListener::bind(addr).await.map_err(ApiError::IoError)?;

        Self::with_listener(listener, &config)
    }

    /// Uses an already bound listener, ignoring the configured endpoint.
    pub fn with_listener(
        listener: TcpListener,
        config: &NotificationConfig,
    ) -> Result<Self, NotificationServerError> {
        info!(target: COMPONENT, endpoint = ?listener, %config, "Initializing server");

        let hub = EventHub::new(config.subscriber_buffer);
        let registry = WebhookRegistry::new();
        let dispatcher = WebhookDispatcher::new(registry.clone(), config.webhook.clone(), &hub)?;

        info!(target: COMPONENT, "Server initialized");

        Ok(Self { listener, hub, registry, dispatcher })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ApiError> {
        self.listener.local_addr().map_err(ApiError::IoError)
    }

    /// Handle used to publish wallet events to subscribers and webhooks.
    pub fn hub(&self) -> EventHub {
        self.hub.clone()
    }

    pub fn registry(&self) -> WebhookRegistry {
        self.registry.clone()
    }

    /// Serves the notification API and delivers webhooks.
    ///
    /// Note: this blocks until the server dies.
    pub async fn serve(self) -> Result<(), NotificationServerError> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Like [`serve`](Self::serve), but stops once `signal` completes.
    ///
    /// Shutting down closes the [`EventHub`], which ends every open notification stream and stops
    /// the webhook dispatcher, then waits for in-flight requests to complete.
    pub async fn serve_with_shutdown(
        self,
        signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), NotificationServerError> {
        let Self { listener, hub, registry, dispatcher } = self;

        // Both tasks run until shutdown, so any earlier exit takes the server down.
        let mut tasks = tokio::task::JoinSet::new();

        let dispatcher_id = tasks.spawn(dispatcher.run()).id();
        let rpc_id = tasks
            .spawn({
                let hub = hub.clone();
                async move {
                    let api = NotificationApi::new(hub.clone(), registry);
                    let shutdown = async move {
                        signal.await;
                        info!(target: COMPONENT, "Shutting down");
                        hub.close();
                    };

                    tonic::transport::Server::builder()
                        .trace_fn(notification_trace_fn)
                        .add_service(NotificationServiceServer::new(api))
                        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
                        .await
                        .map_err(|err| NotificationServerError::from(ApiError::ApiServeFailed(err)))
                }
            })
            .id();

        let task_ids = HashMap::from([(dispatcher_id, "webhook-dispatcher"), (rpc_id, "rpc")]);

        while let Some(task_result) = tasks.join_next_with_id().await {
            let task_id = match &task_result {
                Ok((id, _)) => *id,
                Err(err) => err.id(),
            };
            let task = task_ids.get(&task_id).copied().unwrap_or("unknown");

            match task_result {
                Err(source) => return Err(NotificationServerError::TaskFailed { task, source }),
                Ok((_, Err(err))) => return Err(err),
                Ok((_, Ok(()))) if hub.is_closed() => {
                    info!(target: COMPONENT, task, "Task stopped");
                },
                Ok((_, Ok(()))) => return Err(NotificationServerError::TaskExited(task)),
            }
        }

        info!(target: COMPONENT, "Server stopped");
        Ok(())
    }
}
