use tally_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed state document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("state document holds a corrupt chain: {0}")]
    CorruptChain(#[source] LedgerError),
}
