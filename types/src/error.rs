use thiserror::Error;

/// Errors raised by validated vote construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoteError {
    #[error("voter id must be a non-empty string")]
    EmptyVoterId,

    #[error("candidate must be a non-empty string")]
    EmptyCandidate,
}
