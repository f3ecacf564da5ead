use std::fmt::{Display, Formatter};

use crate::generated::v1 as proto;

/// Location of a transaction in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockDetails {
    /// Block hash, hex encoded.
    pub hash: String,
    pub height: u64,
    /// Block time, in seconds since the unix epoch.
    pub timestamp: i64,
}

impl Display for BlockDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} ({})", self.height, self.hash)
    }
}

// CONVERSIONS
// ================================================================================================

impl From<BlockDetails> for proto::BlockDetails {
    fn from(value: BlockDetails) -> Self {
        Self {
            hash: value.hash,
            height: value.height,
            timestamp: value.timestamp,
        }
    }
}

impl From<&BlockDetails> for proto::BlockDetails {
    fn from(value: &BlockDetails) -> Self {
        value.clone().into()
    }
}

impl From<proto::BlockDetails> for BlockDetails {
    fn from(value: proto::BlockDetails) -> Self {
        Self {
            hash: value.hash,
            height: value.height,
            timestamp: value.timestamp,
        }
    }
}
