use inbox_node_primitives::ErrorKind;

/// Errors that can occur while interacting with the execution engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine could not be reached.
    #[error("engine unavailable: {0}")]
    Unavailable(String),
    /// The engine failed while applying a payload.
    #[error("engine internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Classifies the error for the caller's retry/halt decision.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unavailable(_) => ErrorKind::Transient,
            Self::Internal(_) => ErrorKind::Fatal,
        }
    }
}
