use thiserror::Error;

/// Failure kinds surfaced by the sort engine.
///
/// Input well-formedness is a precondition of the engine, so `MalformedRecord`
/// and `InvalidNumber` abort the run rather than being recovered. `ProtocolStall`
/// is raised only when the channel runtime can tell that a peer hung up; a peer
/// that is alive but silent blocks its correspondent with no timeout.
#[derive(Debug, Error)]
pub enum SortError {
    /// A line with fewer than four delimiter separated fields.
    #[error("malformed record, expected 4 fields: {line}")]
    MalformedRecord { line: String },

    /// A price field that does not parse as a finite number.
    #[error("invalid price value: {value}")]
    InvalidNumber { value: String },

    /// Rejected command or configuration input.
    #[error("{0}")]
    Usage(String),

    /// A peer hung up mid transfer. Unrecoverable.
    #[error("channel to peer {peer} closed before the transfer completed")]
    ProtocolStall { peer: usize },
}
