//! State persistence — the document codec and atomic file I/O.
//!
//! The persisted form is a JSON document with the full chain, the voter
//! map, and any staged votes. Decoding never bypasses integrity checking:
//! a document whose chain fails validation is rejected as corrupt, and
//! callers fall back to a fresh genesis-only ledger instead of operating on
//! an unverified chain.

pub mod document;
pub mod error;
pub mod file;

pub use document::{decode, encode, StateDocument};
pub use error::StoreError;
pub use file::{load_from_path, save_to_path};
