//! JSON bodies posted to webhooks.
//!
//! Field names follow the protobuf schema. Event types are rendered with their protobuf names, an
//! unclassified event is sent as the `UNSPECIFIED` variant.

use ocean_proto::{
    generated::v1, BlockDetails, TransactionEvent, TxEventKind, Utxo, UtxoEvent, UtxoEventKind,
    UtxoStatus,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    pub event_type: String,
    pub txid: String,
    pub account_names: Vec<String>,
    pub block_details: Option<BlockPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoPayload {
    pub event_type: String,
    pub utxos: Vec<UtxoEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPayload {
    pub hash: String,
    pub height: u64,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoEntry {
    pub txid: String,
    pub index: u32,
    pub asset: String,
    pub value: u64,
    /// Hex encoded.
    pub script: String,
    pub asset_blinder: String,
    pub value_blinder: String,
    pub account_name: String,
    pub spent_status: Option<StatusPayload>,
    pub confirmed_status: Option<StatusPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub txid: String,
    pub block_info: Option<BlockPayload>,
}

// CONVERSIONS
// ================================================================================================

impl From<&TransactionEvent> for TransactionPayload {
    fn from(event: &TransactionEvent) -> Self {
        Self {
            event_type: event
                .kind
                .map_or(v1::TxEventType::Unspecified.as_str_name(), TxEventKind::as_str_name)
                .to_string(),
            txid: event.txid.clone(),
            account_names: event.account_names.clone(),
            block_details: event.block.as_ref().map(Into::into),
        }
    }
}

impl From<&UtxoEvent> for UtxoPayload {
    fn from(event: &UtxoEvent) -> Self {
        Self {
            event_type: event
                .kind
                .map_or(v1::UtxoEventType::Unspecified.as_str_name(), UtxoEventKind::as_str_name)
                .to_string(),
            utxos: event.utxos.iter().map(Into::into).collect(),
        }
    }
}

impl From<&BlockDetails> for BlockPayload {
    fn from(block: &BlockDetails) -> Self {
        Self {
            hash: block.hash.clone(),
            height: block.height,
            timestamp: block.timestamp,
        }
    }
}

impl From<&UtxoStatus> for StatusPayload {
    fn from(status: &UtxoStatus) -> Self {
        Self {
            txid: status.txid.clone(),
            block_info: status.block.as_ref().map(Into::into),
        }
    }
}

impl From<&Utxo> for UtxoEntry {
    fn from(utxo: &Utxo) -> Self {
        Self {
            txid: utxo.outpoint.txid.clone(),
            index: utxo.outpoint.index,
            asset: utxo.asset.clone(),
            value: utxo.value,
            script: hex::encode(&utxo.script),
            asset_blinder: utxo.asset_blinder.clone(),
            value_blinder: utxo.value_blinder.clone(),
            account_name: utxo.account_name.clone(),
            spent_status: utxo.spent.as_ref().map(Into::into),
            confirmed_status: utxo.confirmed.as_ref().map(Into::into),
        }
    }
}

// TESTS
// ================================================================================================
