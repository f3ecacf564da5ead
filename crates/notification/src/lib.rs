pub mod config;
pub mod errors;
pub mod hub;
pub mod server;
pub mod webhooks;

pub use hub::EventHub;
pub use server::NotificationServer;
pub use webhooks::{registry::WebhookRegistry, WebhookDispatcher};

// CONSTANTS
// =================================================================================================

pub const COMPONENT: &str = "ocean-notification";

/// Default number of events buffered per subscriber before the oldest ones are dropped.
pub const DEFAULT_SUBSCRIBER_BUFFER: usize = 256;
