use std::fmt;

/// The classification of a pipeline error, enforced at the sequencer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A transient I/O failure: retried with backoff, never advances cursors, surfaced as a
    /// warning.
    Transient,
    /// A consistency or decode failure: the node must halt rather than guess.
    Fatal,
    /// A deterministic per-input rejection by the execution engine: recorded, never halts the
    /// pipeline.
    Rejected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient => write!(f, "transient"),
            Self::Fatal => write!(f, "fatal"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}
