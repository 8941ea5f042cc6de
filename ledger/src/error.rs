use thiserror::Error;

/// What a failing block got wrong, for diagnosis — the chain is never
/// silently repaired.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    #[error("chain has no genesis block")]
    EmptyChain,

    #[error("genesis block index is not 0")]
    GenesisIndex,

    #[error("genesis previous_hash is not the zero sentinel")]
    GenesisPreviousHash,

    #[error("block index does not follow its predecessor")]
    IndexMismatch,

    #[error("previous_hash does not match the predecessor's hash")]
    PreviousHashMismatch,

    #[error("stored hash does not match the block contents")]
    HashMismatch,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("no pending votes to mine")]
    NoPendingVotes,

    #[error("chain validation failed at block {at_index}: {reason}")]
    Validation {
        at_index: u64,
        reason: ValidationReason,
    },
}
