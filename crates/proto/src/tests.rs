//! Wire compatibility of the generated bindings.
//!
//! The `independent` module re-declares a few messages by hand, using only the published field
//! numbers, to check that the generated encoders and decoders agree with any other implementation
//! of the same schema.

use prost::Message;
use proptest::prelude::*;

use crate::generated::{v1, v1alpha};

mod independent {
    #[derive(Clone, PartialEq, prost::Message)]
    pub struct AddWebhookRequest {
        #[prost(string, tag = "1")]
        pub endpoint: String,
        #[prost(int32, tag = "2")]
        pub event_type: i32,
        #[prost(string, tag = "3")]
        pub secret: String,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct WebhookInfo {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(string, tag = "2")]
        pub endpoint: String,
        #[prost(bool, tag = "3")]
        pub is_secured: bool,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct ListWebhooksResponse {
        #[prost(message, repeated, tag = "1")]
        pub webhook_info: Vec<WebhookInfo>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct BlockDetails {
        #[prost(string, tag = "1")]
        pub hash: String,
        #[prost(uint64, tag = "2")]
        pub height: u64,
        #[prost(int64, tag = "3")]
        pub timestamp: i64,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct TransactionNotificationsResponse {
        #[prost(string, repeated, tag = "1")]
        pub account_names: Vec<String>,
        #[prost(string, tag = "2")]
        pub txid: String,
        #[prost(int32, tag = "3")]
        pub event_type: i32,
        #[prost(message, optional, tag = "4")]
        pub block_details: Option<BlockDetails>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct UtxoStatus {
        #[prost(string, tag = "1")]
        pub txid: String,
        #[prost(message, optional, tag = "2")]
        pub block_info: Option<BlockDetails>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct Utxo {
        #[prost(string, tag = "1")]
        pub txid: String,
        #[prost(uint32, tag = "2")]
        pub index: u32,
        #[prost(string, tag = "3")]
        pub asset: String,
        #[prost(uint64, tag = "4")]
        pub value: u64,
        #[prost(string, tag = "5")]
        pub script: String,
        #[prost(string, tag = "6")]
        pub asset_blinder: String,
        #[prost(string, tag = "7")]
        pub value_blinder: String,
        #[prost(string, tag = "8")]
        pub account_name: String,
        #[prost(message, optional, tag = "9")]
        pub spent_status: Option<UtxoStatus>,
        #[prost(message, optional, tag = "10")]
        pub confirmed_status: Option<UtxoStatus>,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct UtxosNotificationsResponse {
        #[prost(message, repeated, tag = "1")]
        pub utxos: Vec<Utxo>,
        #[prost(int32, tag = "2")]
        pub event_type: i32,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct AccountKey {
        #[prost(uint64, tag = "1")]
        pub id: u64,
        #[prost(string, tag = "2")]
        pub name: String,
    }
}

#[test]
fn add_webhook_request_matches_independent_schema() {
    let request = v1::AddWebhookRequest {
        endpoint: "https://example.com/hook".to_string(),
        event_type: v1::WebhookEventType::Transaction as i32,
        secret: "s3cr3t".to_string(),
    };
    let bytes = request.encode_to_vec();

    let mut expected = vec![0x0a, 24];
    expected.extend_from_slice(b"https://example.com/hook");
    expected.extend_from_slice(&[0x10, 0x01, 0x1a, 0x06]);
    expected.extend_from_slice(b"s3cr3t");
    assert_eq!(bytes, expected);

    let decoded = independent::AddWebhookRequest::decode(bytes.as_slice()).unwrap();
    assert_eq!(decoded.endpoint, request.endpoint);
    assert_eq!(decoded.event_type, 1);
    assert_eq!(decoded.secret, request.secret);
}

#[test]
fn unspecified_event_type_is_omitted_on_the_wire() {
    let request = v1::ListWebhooksRequest {
        event_type: v1::WebhookEventType::Unspecified as i32,
    };
    assert!(request.encode_to_vec().is_empty());

    let decoded = v1::ListWebhooksRequest::decode(&[][..]).unwrap();
    assert_eq!(decoded.event_type, 0);
    assert_eq!(decoded.event_type(), v1::WebhookEventType::Unspecified);
}

#[test]
fn webhook_info_field_numbers_are_stable() {
    let foreign = independent::ListWebhooksResponse {
        webhook_info: vec![
            independent::WebhookInfo {
                id: "a1".to_string(),
                endpoint: "http://localhost:8080/tx".to_string(),
                is_secured: true,
            },
            independent::WebhookInfo {
                id: "b2".to_string(),
                endpoint: "https://example.com/utxos".to_string(),
                is_secured: false,
            },
        ],
    };

    let decoded = v1::ListWebhooksResponse::decode(foreign.encode_to_vec().as_slice()).unwrap();
    assert_eq!(decoded.webhook_info.len(), 2);
    assert_eq!(decoded.webhook_info[0].id, "a1");
    assert_eq!(decoded.webhook_info[0].endpoint, "http://localhost:8080/tx");
    assert!(decoded.webhook_info[0].is_secured);
    assert!(!decoded.webhook_info[1].is_secured);
}

#[test]
fn transaction_notification_field_numbers_are_stable() {
    let response = v1::TransactionNotificationsResponse {
        account_names: vec!["main".to_string()],
        txid: "ff".repeat(32),
        event_type: v1::TxEventType::Confirmed as i32,
        block_details: Some(v1::BlockDetails {
            hash: "ee".repeat(32),
            height: 10,
            timestamp: 1_700_000_000,
        }),
    };

    let decoded =
        independent::TransactionNotificationsResponse::decode(response.encode_to_vec().as_slice())
            .unwrap();
    assert_eq!(decoded.account_names, response.account_names);
    assert_eq!(decoded.txid, response.txid);
    assert_eq!(decoded.event_type, 3);
    assert_eq!(decoded.block_details.map(|b| b.height), Some(10));
}

#[test]
fn unset_event_type_decodes_to_unspecified() {
    let key = independent::AccountKey { id: 1, name: "main".to_string() };
    let mut envelope = v1alpha::UtxoWithEvent {
        account_key: Some(v1alpha::AccountKey { id: key.id, name: key.name.clone() }),
        utxo: Some(v1alpha::Utxo::default()),
        event_type: 0,
    };

    let decoded = v1alpha::UtxoWithEvent::decode(envelope.encode_to_vec().as_slice()).unwrap();
    assert_eq!(decoded.event_type(), v1alpha::UtxoEventType::Unspecified);

    envelope.set_event_type(v1alpha::UtxoEventType::Spent);
    let decoded = v1alpha::UtxoWithEvent::decode(envelope.encode_to_vec().as_slice()).unwrap();
    assert_eq!(decoded.event_type(), v1alpha::UtxoEventType::Spent);

    let decoded_key =
        independent::AccountKey::decode(decoded.account_key.unwrap().encode_to_vec().as_slice())
            .unwrap();
    assert_eq!(decoded_key, key);
}

#[test]
fn utxos_notification_field_numbers_are_stable() {
    let confirmed = v1::UtxoStatus {
        txid: "cd".repeat(32),
        block_info: Some(v1::BlockDetails {
            hash: "ee".repeat(32),
            height: 42,
            timestamp: 1_700_000_600,
        }),
    };
    let response = v1::UtxosNotificationsResponse {
        utxos: vec![
            v1::Utxo {
                txid: "ab".repeat(32),
                index: 3,
                asset: "11".repeat(32),
                value: 5_000,
                script: "0014".to_string(),
                asset_blinder: "22".repeat(32),
                value_blinder: "33".repeat(32),
                account_name: "main".to_string(),
                spent_status: None,
                confirmed_status: Some(confirmed),
            },
            v1::Utxo { txid: "ba".repeat(32), ..Default::default() },
        ],
        event_type: v1::UtxoEventType::Spent as i32,
    };

    let decoded =
        independent::UtxosNotificationsResponse::decode(response.encode_to_vec().as_slice())
            .unwrap();
    assert_eq!(decoded.event_type, 3);
    assert_eq!(decoded.utxos.len(), 2);

    let utxo = &decoded.utxos[0];
    assert_eq!(utxo.txid, "ab".repeat(32));
    assert_eq!(utxo.index, 3);
    assert_eq!(utxo.asset, "11".repeat(32));
    assert_eq!(utxo.value, 5_000);
    assert_eq!(utxo.script, "0014");
    assert_eq!(utxo.asset_blinder, "22".repeat(32));
    assert_eq!(utxo.value_blinder, "33".repeat(32));
    assert_eq!(utxo.account_name, "main");
    assert_eq!(utxo.spent_status, None);
    let status = utxo.confirmed_status.as_ref().unwrap();
    assert_eq!(status.txid, "cd".repeat(32));
    assert_eq!(status.block_info.as_ref().map(|block| block.height), Some(42));
    assert_eq!(decoded.utxos[1].txid, "ba".repeat(32));

    // And back: what another implementation writes, the generated decoder reads.
    let generated = v1::UtxosNotificationsResponse::decode(decoded.encode_to_vec().as_slice())
        .unwrap();
    assert_eq!(generated, response);
    assert_eq!(generated.event_type(), v1::UtxoEventType::Spent);
}

fn decoded<M: Message + Default>(message: &M) -> M {
    M::decode(message.encode_to_vec().as_slice()).unwrap()
}

prop_compose! {
    fn hex_id()(id in "[0-9a-f]{64}") -> String {
        id
    }
}

prop_compose! {
    fn account_key()(id in any::<u64>(), name in "[a-z][a-z0-9_]{0,15}") -> v1alpha::AccountKey {
        v1alpha::AccountKey { id, name }
    }
}

prop_compose! {
    fn v1alpha_utxo()(
        txid in hex_id(),
        index in any::<i64>(),
        asset in any::<Vec<u8>>(),
        value in any::<Vec<u8>>(),
        script in any::<Vec<u8>>(),
        is_confirmed in any::<bool>(),
        is_locked in any::<bool>(),
    ) -> v1alpha::Utxo {
        v1alpha::Utxo { txid, index, asset, value, script, is_confirmed, is_locked }
    }
}

prop_compose! {
    fn block_details()(
        hash in hex_id(),
        height in any::<u64>(),
        timestamp in any::<i64>(),
    ) -> v1::BlockDetails {
        v1::BlockDetails { hash, height, timestamp }
    }
}

prop_compose! {
    fn utxo_status()(txid in hex_id(), block_info in proptest::option::of(block_details()))
        -> v1::UtxoStatus
    {
        v1::UtxoStatus { txid, block_info }
    }
}

prop_compose! {
    fn v1_utxo()(
        txid in hex_id(),
        index in any::<u32>(),
        asset in hex_id(),
        value in any::<u64>(),
        script in "([0-9a-f]{2}){0,34}",
        asset_blinder in "([0-9a-f]{64})?",
        value_blinder in "([0-9a-f]{64})?",
        account_name in "[a-z]{0,12}",
        spent_status in proptest::option::of(utxo_status()),
        confirmed_status in proptest::option::of(utxo_status()),
    ) -> v1::Utxo {
        v1::Utxo {
            txid,
            index,
            asset,
            value,
            script,
            asset_blinder,
            value_blinder,
            account_name,
            spent_status,
            confirmed_status,
        }
    }
}

proptest! {
    #[test]
    fn v1alpha_utxo_round_trip(utxo in v1alpha_utxo()) {
        prop_assert_eq!(decoded(&utxo), utxo);
    }

    #[test]
    fn account_info_round_trip(
        account_key in proptest::option::of(account_key()),
        derivation_path in "m(/[0-9]{1,4}'?){0,5}",
        xpub in "[1-9A-HJ-NP-Za-km-z]{0,111}",
    ) {
        let info = v1alpha::AccountInfo { account_key, derivation_path, xpub };
        prop_assert_eq!(decoded(&info), info);
    }

    #[test]
    fn balance_info_round_trip(
        total_balance: u64,
        confirmed_balance: u64,
        unconfirmed_balance: u64,
    ) {
        let balance =
            v1alpha::BalanceInfo { total_balance, confirmed_balance, unconfirmed_balance };
        prop_assert_eq!(decoded(&balance), balance);
    }

    #[test]
    fn input_and_output_round_trip(
        txid in hex_id(),
        index: i64,
        asset in hex_id(),
        amount: i64,
        address in "[a-z0-9]{0,64}",
    ) {
        let input = v1alpha::Input { txid, index };
        prop_assert_eq!(decoded(&input), input);

        let output = v1alpha::Output { asset, amount, address };
        prop_assert_eq!(decoded(&output), output);
    }

    #[test]
    fn utxos_round_trip(
        account_key in proptest::option::of(account_key()),
        utxos in proptest::collection::vec(v1alpha_utxo(), 0..4),
    ) {
        let utxos = v1alpha::Utxos { account_key, utxos };
        prop_assert_eq!(decoded(&utxos), utxos);
    }

    #[test]
    fn template_round_trip(format in 0i32..5, value in "\\PC{0,64}") {
        let template = v1alpha::Template { format, value };
        let round_tripped = decoded(&template);
        prop_assert_eq!(round_tripped.format(), template.format());
        prop_assert_eq!(round_tripped, template);
    }

    #[test]
    fn v1_utxo_round_trip(utxo in v1_utxo()) {
        prop_assert_eq!(decoded(&utxo), utxo);
    }

    #[test]
    fn utxo_status_round_trip(status in utxo_status()) {
        prop_assert_eq!(decoded(&status), status);
    }

    #[test]
    fn block_details_round_trip(block in block_details()) {
        prop_assert_eq!(decoded(&block), block);
    }

    #[test]
    fn utxos_notifications_response_round_trip(
        utxos in proptest::collection::vec(v1_utxo(), 0..4),
        event_type in 0i32..4,
    ) {
        let response = v1::UtxosNotificationsResponse { utxos, event_type };
        prop_assert_eq!(decoded(&response), response);
    }

    #[test]
    fn add_webhook_request_round_trip(
        endpoint in "https?://[a-z]{1,16}\\.[a-z]{2,3}/[a-z]{0,8}",
        event_type in 0i32..3,
        secret in "[ -~]{0,32}",
    ) {
        let request = v1::AddWebhookRequest { endpoint, event_type, secret };
        let decoded = v1::AddWebhookRequest::decode(request.encode_to_vec().as_slice()).unwrap();
        prop_assert_eq!(decoded, request);
    }
}
