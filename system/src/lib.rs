//! The voting coordinator.
//!
//! [`VotingSystem`] owns the registry and the ledger and is the single
//! entry point for collaborators (CLIs, GUIs): register, cast, mine, tally,
//! validate, save, load. Every mutator takes `&mut self`, so exclusive
//! access is enforced by the borrow checker; a collaborator sharing one
//! system across threads wraps it in a single exclusive lock.

pub mod coordinator;
pub mod error;

pub use coordinator::{BlockSummary, SystemSummary, VotingSystem};
pub use error::SystemError;
