//! The voter registry — registration and voting-status tracking.

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tally_types::VoterId;

/// Per-voter state. The voter's id is the registry map key, so the record
/// itself carries only the voting flag — this is also the exact shape of
/// the persisted `voters` document member.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub has_voted: bool,
}

/// Tracks registered voters and whether each has voted.
///
/// A `BTreeMap` keeps iteration and serialization order deterministic, so
/// two saves of the same state produce identical documents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoterRegistry {
    voters: BTreeMap<VoterId, Voter>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new voter.
    pub fn register(&mut self, id: impl Into<VoterId>) -> Result<(), RegistryError> {
        let id = id.into();
        if id.is_empty() {
            return Err(RegistryError::InvalidVoterId);
        }
        if self.voters.contains_key(&id) {
            return Err(RegistryError::DuplicateVoter(id.as_str().to_owned()));
        }
        self.voters.insert(id, Voter::default());
        Ok(())
    }

    /// Authorize a voter and mark them as having voted, in one operation.
    ///
    /// On any error the registry is unchanged.
    pub fn authorize_and_mark(&mut self, id: &VoterId) -> Result<(), RegistryError> {
        let voter = self
            .voters
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnregisteredVoter(id.as_str().to_owned()))?;
        if voter.has_voted {
            return Err(RegistryError::AlreadyVoted(id.as_str().to_owned()));
        }
        voter.has_voted = true;
        Ok(())
    }

    pub fn is_registered(&self, id: &VoterId) -> bool {
        self.voters.contains_key(id)
    }

    pub fn has_voted(&self, id: &VoterId) -> bool {
        self.voters.get(id).is_some_and(|v| v.has_voted)
    }

    pub fn voter(&self, id: &VoterId) -> Option<&Voter> {
        self.voters.get(id)
    }

    /// Number of registered voters.
    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    /// Number of voters who have voted.
    pub fn voted_count(&self) -> usize {
        self.voters.values().filter(|v| v.has_voted).count()
    }

    /// All registered voter ids, in sorted order.
    pub fn registered_ids(&self) -> impl Iterator<Item = &VoterId> {
        self.voters.keys()
    }

    /// Ids of voters who have voted, in sorted order.
    pub fn voted_ids(&self) -> impl Iterator<Item = &VoterId> {
        self.voters
            .iter()
            .filter(|(_, v)| v.has_voted)
            .map(|(id, _)| id)
    }

    /// Rebuild a registry from a persisted voter map.
    pub fn from_parts(voters: BTreeMap<VoterId, Voter>) -> Self {
        Self { voters }
    }

    /// The underlying map, in the persisted-document shape.
    pub fn as_map(&self) -> &BTreeMap<VoterId, Voter> {
        &self.voters
    }
}
