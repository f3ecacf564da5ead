//! Event classifications carried by the notification schema.
//!
//! Every event enumeration reserves the value `0` for its `UNSPECIFIED` variant. The domain types
//! defined here have no such variant: an unset field decodes to `None`, which callers treat as "no
//! classification" rather than defaulting to a concrete event.

use std::fmt::{Display, Formatter};

use crate::{
    errors::ConversionError,
    generated::{v1, v1alpha},
};

/// Protobuf value of the `UNSPECIFIED` variant shared by all event enumerations.
pub const UNSPECIFIED: i32 = 0;

macro_rules! event_kind {
    (
        $(#[$meta:meta])*
        pub enum $name:ident => $proto:ident {
            $($variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Decodes a raw protobuf enum value.
            ///
            /// `UNSPECIFIED` yields `Ok(None)`, values outside of the declared range are rejected.
            pub fn from_proto(value: i32) -> Result<Option<Self>, ConversionError> {
                match v1::$proto::try_from(value) {
                    Ok(v1::$proto::Unspecified) => Ok(None),
                    $(Ok(v1::$proto::$variant) => Ok(Some(Self::$variant)),)+
                    Err(_) => Err(ConversionError::UnknownEnumValue {
                        entity: stringify!($proto),
                        value,
                    }),
                }
            }

            /// Encodes an optional classification, mapping `None` to `UNSPECIFIED`.
            pub fn to_proto(kind: Option<Self>) -> i32 {
                kind.map_or(UNSPECIFIED, i32::from)
            }

            /// The protobuf name of the variant, e.g. `TX_EVENT_TYPE_CONFIRMED`.
            pub fn as_str_name(self) -> &'static str {
                v1::$proto::from(self).as_str_name()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str_name())
            }
        }

        impl From<$name> for v1::$proto {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => Self::$variant,)+
                }
            }
        }

        impl From<$name> for v1alpha::$proto {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => Self::$variant,)+
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                v1::$proto::from(value) as i32
            }
        }
    };
}

event_kind! {
    /// Lifecycle step of a wallet transaction.
    pub enum TxEventKind => TxEventType {
        Broadcasted,
        Unconfirmed,
        Confirmed,
    }
}

event_kind! {
    /// What happened to a set of unspent outputs.
    pub enum UtxoEventKind => UtxoEventType {
        Locked,
        Unlocked,
        Spent,
    }
}

event_kind! {
    /// Class of events a webhook subscribes to.
    pub enum WebhookEventKind => WebhookEventType {
        Transaction,
        Unspents,
    }
}

impl From<TxEventKind> for WebhookEventKind {
    fn from(_: TxEventKind) -> Self {
        Self::Transaction
    }
}

impl From<UtxoEventKind> for WebhookEventKind {
    fn from(_: UtxoEventKind) -> Self {
        Self::Unspents
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn unspecified_is_no_classification() {
        assert_eq!(TxEventKind::from_proto(UNSPECIFIED), Ok(None));
        assert_eq!(UtxoEventKind::from_proto(UNSPECIFIED), Ok(None));
        assert_eq!(WebhookEventKind::from_proto(UNSPECIFIED), Ok(None));

        assert_eq!(TxEventKind::to_proto(None), 0);
        assert_eq!(WebhookEventKind::to_proto(None), 0);
    }

    #[test]
    fn known_values_decode() {
        assert_eq!(TxEventKind::from_proto(1), Ok(Some(TxEventKind::Broadcasted)));
        assert_eq!(TxEventKind::from_proto(3), Ok(Some(TxEventKind::Confirmed)));
        assert_eq!(UtxoEventKind::from_proto(3), Ok(Some(UtxoEventKind::Spent)));
        assert_eq!(WebhookEventKind::from_proto(2), Ok(Some(WebhookEventKind::Unspents)));

        assert_eq!(i32::from(UtxoEventKind::Unlocked), 2);
        assert_eq!(TxEventKind::to_proto(Some(TxEventKind::Unconfirmed)), 2);
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert_matches!(
            WebhookEventKind::from_proto(7),
            Err(ConversionError::UnknownEnumValue { entity: "WebhookEventType", value: 7 })
        );
        assert_matches!(TxEventKind::from_proto(-1), Err(ConversionError::UnknownEnumValue { .. }));
    }

    #[test]
    fn packages_share_enum_values() {
        for kind in [TxEventKind::Broadcasted, TxEventKind::Unconfirmed, TxEventKind::Confirmed] {
            assert_eq!(v1::TxEventType::from(kind) as i32, v1alpha::TxEventType::from(kind) as i32);
        }
        for kind in [UtxoEventKind::Locked, UtxoEventKind::Unlocked, UtxoEventKind::Spent] {
            assert_eq!(
                v1::UtxoEventType::from(kind) as i32,
                v1alpha::UtxoEventType::from(kind) as i32
            );
        }
        for kind in [WebhookEventKind::Transaction, WebhookEventKind::Unspents] {
            assert_eq!(
                v1::WebhookEventType::from(kind) as i32,
                v1alpha::WebhookEventType::from(kind) as i32
            );
        }
    }

    #[test]
    fn display_uses_protobuf_names() {
        assert_eq!(TxEventKind::Confirmed.to_string(), "TX_EVENT_TYPE_CONFIRMED");
        assert_eq!(WebhookEventKind::Unspents.to_string(), "WEBHOOK_EVENT_TYPE_UNSPENTS");
        assert_eq!(WebhookEventKind::from(UtxoEventKind::Spent), WebhookEventKind::Unspents);
    }
}
