//! Webhook registration and delivery.

mod dispatcher;
mod payload;
pub mod registry;

pub use dispatcher::WebhookDispatcher;
pub use payload::{TransactionPayload, UtxoPayload};
