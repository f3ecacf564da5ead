use crate::{
    domain::{
        block::BlockDetails,
        convert,
        event_kind::{TxEventKind, UtxoEventKind, WebhookEventKind},
        try_convert,
        utxo::Utxo,
    },
    errors::ConversionError,
    generated::v1 as proto,
};

// TRANSACTION EVENT
// ================================================================================================

/// A change in the state of a wallet transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEvent {
    /// `None` when the producer did not classify the event.
    pub kind: Option<TxEventKind>,
    pub txid: String,
    /// Wallet accounts involved in the transaction.
    pub account_names: Vec<String>,
    /// Only set once the transaction is confirmed.
    pub block: Option<BlockDetails>,
}

impl TransactionEvent {
    pub fn webhook_kind(&self) -> WebhookEventKind {
        WebhookEventKind::Transaction
    }
}

impl From<TransactionEvent> for proto::TransactionNotificationsResponse {
    fn from(value: TransactionEvent) -> Self {
        Self {
            account_names: value.account_names,
            txid: value.txid,
            event_type: TxEventKind::to_proto(value.kind),
            block_details: value.block.map(Into::into),
        }
    }
}

impl TryFrom<proto::TransactionNotificationsResponse> for TransactionEvent {
    type Error = ConversionError;

    fn try_from(value: proto::TransactionNotificationsResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: TxEventKind::from_proto(value.event_type)?,
            txid: value.txid,
            account_names: value.account_names,
            block: value.block_details.map(Into::into),
        })
    }
}

// UTXO EVENT
// ================================================================================================

/// A change affecting one or more unspent outputs of the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtxoEvent {
    /// `None` when the producer did not classify the event.
    pub kind: Option<UtxoEventKind>,
    pub utxos: Vec<Utxo>,
}

impl UtxoEvent {
    pub fn webhook_kind(&self) -> WebhookEventKind {
        WebhookEventKind::Unspents
    }
}

impl From<UtxoEvent> for proto::UtxosNotificationsResponse {
    fn from(value: UtxoEvent) -> Self {
        Self {
            utxos: convert(value.utxos),
            event_type: UtxoEventKind::to_proto(value.kind),
        }
    }
}

impl TryFrom<proto::UtxosNotificationsResponse> for UtxoEvent {
    type Error = ConversionError;

    fn try_from(value: proto::UtxosNotificationsResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: UtxoEventKind::from_proto(value.event_type)?,
            utxos: try_convert(value.utxos)?,
        })
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn confirmed_tx() -> TransactionEvent {
        TransactionEvent {
            kind: Some(TxEventKind::Confirmed),
            txid: "11".repeat(32),
            account_names: vec!["main".to_string(), "savings".to_string()],
            block: Some(BlockDetails {
                hash: "22".repeat(32),
                height: 2_345_678,
                timestamp: 1_700_000_000,
            }),
        }
    }

    #[test]
    fn transaction_event_into_response() {
        let response = proto::TransactionNotificationsResponse::from(confirmed_tx());

        assert_eq!(response.event_type(), proto::TxEventType::Confirmed);
        assert_eq!(response.account_names, ["main", "savings"]);
        assert_eq!(response.block_details.as_ref().map(|b| b.height), Some(2_345_678));

        assert_eq!(TransactionEvent::try_from(response).unwrap(), confirmed_tx());
    }

    #[test]
    fn unclassified_transaction_stays_unclassified() {
        let response = proto::TransactionNotificationsResponse {
            txid: "33".repeat(32),
            ..Default::default()
        };

        let event = TransactionEvent::try_from(response).unwrap();
        assert_eq!(event.kind, None);
        assert_eq!(event.block, None);
    }

    #[test]
    fn utxo_event_with_unknown_type_is_rejected() {
        let response = proto::UtxosNotificationsResponse { utxos: vec![], event_type: 42 };

        assert_matches!(
            UtxoEvent::try_from(response),
            Err(ConversionError::UnknownEnumValue { value: 42, .. })
        );
    }
}
