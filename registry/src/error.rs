use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("voter id must be a non-empty string")]
    InvalidVoterId,

    #[error("voter {0} is already registered")]
    DuplicateVoter(String),

    #[error("voter {0} is not registered")]
    UnregisteredVoter(String),

    #[error("voter {0} has already voted")]
    AlreadyVoted(String),
}
