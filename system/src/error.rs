use tally_ledger::LedgerError;
use tally_registry::RegistryError;
use tally_store::StoreError;
use tally_types::VoteError;
use thiserror::Error;

/// Everything a collaborator can see go wrong. All variants are
/// recoverable at the boundary; none should terminate the process.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Vote(#[from] VoteError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
