//! Voter registration and one-vote-per-voter enforcement.
//!
//! The registry is the sole owner of voter state. The coordinator never
//! flips a voter's flag directly; it goes through [`VoterRegistry::authorize_and_mark`],
//! the single operation that both checks and marks, so there is no
//! check-then-mark window between two calls.

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::{Voter, VoterRegistry};
