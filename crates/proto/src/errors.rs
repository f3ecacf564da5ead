use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("hex error: {0}")]
    HexError(#[from] hex::FromHexError),
    #[error("value {value} is not a known variant of {entity}")]
    UnknownEnumValue { entity: &'static str, value: i32 },
}
