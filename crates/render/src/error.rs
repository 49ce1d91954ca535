use thiserror::Error;

/// Errors raised by a layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The container element is not available.
    #[error("container {0} is not mounted")]
    ContainerUnavailable(String),
    /// The engine could not be constructed.
    #[error("engine construction failed: {0}")]
    Construction(String),
    /// An added item already exists in the dataset.
    #[error("duplicate dataset id {0}")]
    DuplicateId(String),
    /// An updated item does not exist in the dataset.
    #[error("unknown dataset id {0}")]
    UnknownId(String),
    /// The engine was used after being destroyed.
    #[error("engine has been destroyed")]
    Destroyed,
}
