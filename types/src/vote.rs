//! The vote value type.

use crate::error::VoteError;
use crate::time::Timestamp;
use crate::voter::VoterId;
use serde::{Deserialize, Serialize};

/// A single cast vote. Immutable once constructed.
///
/// Duplicate prevention (same voter twice) is the registry's job, enforced
/// by the coordinator before a vote is ever created — two `Vote` values are
/// never merged or deduplicated here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "voter_id")]
    voter: VoterId,
    candidate: String,
    timestamp: Timestamp,
}

impl Vote {
    /// Construct a vote, rejecting empty voter ids and candidate names.
    pub fn new(
        voter: impl Into<VoterId>,
        candidate: impl Into<String>,
        timestamp: Timestamp,
    ) -> Result<Self, VoteError> {
        let voter = voter.into();
        let candidate = candidate.into();
        if voter.is_empty() {
            return Err(VoteError::EmptyVoterId);
        }
        if candidate.is_empty() {
            return Err(VoteError::EmptyCandidate);
        }
        Ok(Self {
            voter,
            candidate,
            timestamp,
        })
    }

    /// Construct a vote stamped with the current time.
    pub fn cast_now(
        voter: impl Into<VoterId>,
        candidate: impl Into<String>,
    ) -> Result<Self, VoteError> {
        Self::new(voter, candidate, Timestamp::now())
    }

    pub fn voter(&self) -> &VoterId {
        &self.voter
    }

    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
