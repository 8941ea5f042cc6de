//! Append-only vote chain.
//!
//! Every block commits a batch of votes and links to its predecessor by
//! hash. Integrity is checked by re-deriving hashes and links, never by
//! trusting stored values — tampering with any committed byte surfaces as a
//! validation failure at that block's index.

pub mod block;
pub mod chain;
pub mod error;

pub use block::Block;
pub use chain::Ledger;
pub use error::{LedgerError, ValidationReason};
