use thiserror::Error;

/// Errors raised while decoding a pool's fee attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    /// The pool carries no fee attribute.
    #[error("pool {0} has no fee attribute")]
    MissingAttribute(String),
    /// The attribute is not a hexadecimal integer.
    #[error("invalid hex fee value: {0:?}")]
    InvalidHex(String),
    /// No fee encoding is registered for the protocol.
    #[error("unknown fee encoding for protocol {0}")]
    UnknownProtocol(String),
    /// The decoded integer does not fit a decimal.
    #[error("fee value {0} is out of range")]
    OutOfRange(String),
}
