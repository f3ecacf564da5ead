use std::fmt::{Display, Formatter};

use crate::{domain::block::BlockDetails, errors::ConversionError, generated::v1 as proto};

// OUT POINT
// ================================================================================================

/// Reference to a transaction output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutPoint {
    pub txid: String,
    pub index: u32,
}

impl OutPoint {
    pub fn new(txid: impl Into<String>, index: u32) -> Self {
        Self { txid: txid.into(), index }
    }
}

impl Display for OutPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.txid, self.index)
    }
}

// UTXO
// ================================================================================================

/// The transaction that confirmed or spent an output, and the block including it if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UtxoStatus {
    pub txid: String,
    pub block: Option<BlockDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Utxo {
    pub outpoint: OutPoint,
    pub asset: String,
    pub value: u64,
    pub script: Vec<u8>,
    pub asset_blinder: String,
    pub value_blinder: String,
    pub account_name: String,
    pub spent: Option<UtxoStatus>,
    pub confirmed: Option<UtxoStatus>,
}

impl Utxo {
    pub fn is_spent(&self) -> bool {
        self.spent.is_some()
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed.is_some()
    }
}

// CONVERSIONS
// ================================================================================================

impl From<UtxoStatus> for proto::UtxoStatus {
    fn from(value: UtxoStatus) -> Self {
        Self {
            txid: value.txid,
            block_info: value.block.map(Into::into),
        }
    }
}

impl From<proto::UtxoStatus> for UtxoStatus {
    fn from(value: proto::UtxoStatus) -> Self {
        Self {
            txid: value.txid,
            block: value.block_info.map(Into::into),
        }
    }
}

impl From<Utxo> for proto::Utxo {
    fn from(value: Utxo) -> Self {
        Self {
            txid: value.outpoint.txid,
            index: value.outpoint.index,
            asset: value.asset,
            value: value.value,
            script: hex::encode(value.script),
            asset_blinder: value.asset_blinder,
            value_blinder: value.value_blinder,
            account_name: value.account_name,
            spent_status: value.spent.map(Into::into),
            confirmed_status: value.confirmed.map(Into::into),
        }
    }
}

impl TryFrom<proto::Utxo> for Utxo {
    type Error = ConversionError;

    fn try_from(value: proto::Utxo) -> Result<Self, Self::Error> {
        Ok(Self {
            outpoint: OutPoint { txid: value.txid, index: value.index },
            asset: value.asset,
            value: value.value,
            script: hex::decode(value.script)?,
            asset_blinder: value.asset_blinder,
            value_blinder: value.value_blinder,
            account_name: value.account_name,
            spent: value.spent_status.map(Into::into),
            confirmed: value.confirmed_status.map(Into::into),
        })
    }
}

// TESTS
// ================================================================================================
