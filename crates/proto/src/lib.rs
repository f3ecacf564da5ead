pub mod domain;
pub mod errors;

#[rustfmt::skip]
pub mod generated;

#[cfg(test)]
mod tests;

// RE-EXPORTS
// ================================================================================================

pub use domain::{
    block::BlockDetails,
    convert,
    event::{TransactionEvent, UtxoEvent},
    event_kind::{TxEventKind, UtxoEventKind, WebhookEventKind},
    try_convert,
    utxo::{OutPoint, Utxo, UtxoStatus},
    webhook::{Webhook, WebhookId},
};
