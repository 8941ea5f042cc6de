//! Fundamental types for the tallychain voting ledger.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: voter identifiers, block hashes, timestamps, and the vote
//! value type itself.

pub mod error;
pub mod hash;
pub mod time;
pub mod vote;
pub mod voter;

pub use error::VoteError;
pub use hash::BlockHash;
pub use time::Timestamp;
pub use vote::Vote;
pub use voter::VoterId;
