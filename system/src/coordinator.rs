//! The coordinator — public use-cases over the registry and the ledger.

use crate::error::SystemError;
use std::collections::BTreeMap;
use std::path::Path;
use tally_ledger::Ledger;
use tally_registry::VoterRegistry;
use tally_store as store;
use tally_types::{BlockHash, Timestamp, Vote, VoterId};
use tracing::{info, warn};

/// What a collaborator gets back from a successful mine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockSummary {
    pub index: u64,
    pub hash: BlockHash,
    pub vote_count: usize,
    pub timestamp: Timestamp,
}

/// Headline counts for status displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemSummary {
    pub blocks: usize,
    pub committed_votes: usize,
    pub pending_votes: usize,
    pub registered_voters: usize,
    pub voted_voters: usize,
}

/// Owns the whole voting state and exposes the operation contracts.
///
/// Created fresh (genesis-only), or wholesale-replaced by a successful
/// load; there is no ambient global instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VotingSystem {
    ledger: Ledger,
    registry: VoterRegistry,
}

impl Default for VotingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl VotingSystem {
    /// A fresh system: genesis-only ledger, empty registry.
    pub fn new() -> Self {
        Self {
            ledger: Ledger::new(Timestamp::now()),
            registry: VoterRegistry::new(),
        }
    }

    /// Register a voter.
    pub fn register_voter(&mut self, id: impl Into<VoterId>) -> Result<(), SystemError> {
        let id = id.into();
        self.registry.register(id.clone())?;
        info!(voter = %id, "voter registered");
        Ok(())
    }

    /// Cast a vote: authorize-and-mark, then stage.
    ///
    /// The vote is constructed first, so an invalid candidate fails before
    /// the registry is touched; staging itself cannot fail, so a successful
    /// mark is always followed by a staged vote. Both effects happen or
    /// neither does.
    pub fn cast_vote(
        &mut self,
        id: impl Into<VoterId>,
        candidate: impl Into<String>,
    ) -> Result<Vote, SystemError> {
        let id = id.into();
        let vote = Vote::cast_now(id.clone(), candidate)?;
        self.registry.authorize_and_mark(&id)?;
        self.ledger.stage(vote.clone());
        info!(voter = %id, candidate = vote.candidate(), "vote staged");
        Ok(vote)
    }

    /// Mine all pending votes into a new block.
    pub fn mine_pending(&mut self) -> Result<BlockSummary, SystemError> {
        let block = self.ledger.mine(Timestamp::now())?;
        let summary = BlockSummary {
            index: block.index(),
            hash: *block.hash(),
            vote_count: block.vote_count(),
            timestamp: block.timestamp(),
        };
        info!(index = summary.index, votes = summary.vote_count, hash = %summary.hash, "block mined");
        Ok(summary)
    }

    /// Per-candidate counts over committed blocks.
    pub fn results(&self) -> BTreeMap<String, u64> {
        self.ledger.tally()
    }

    /// Candidates that have received committed votes, sorted.
    pub fn candidates(&self) -> Vec<String> {
        self.ledger.tally().into_keys().collect()
    }

    /// Validate the chain end to end.
    pub fn validate(&self) -> Result<(), SystemError> {
        self.ledger.validate()?;
        Ok(())
    }

    /// The vote cast by a voter: committed first, then staged.
    pub fn vote_of(&self, id: &VoterId) -> Option<&Vote> {
        self.ledger
            .vote_by(id)
            .or_else(|| self.ledger.pending().iter().find(|v| v.voter() == id))
    }

    pub fn pending_count(&self) -> usize {
        self.ledger.pending_count()
    }

    pub fn summary(&self) -> SystemSummary {
        SystemSummary {
            blocks: self.ledger.len(),
            committed_votes: self.ledger.all_votes().count(),
            pending_votes: self.ledger.pending_count(),
            registered_voters: self.registry.len(),
            voted_voters: self.registry.voted_count(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn registry(&self) -> &VoterRegistry {
        &self.registry
    }

    /// Atomically persist the full state to `path`.
    pub fn save(&self, path: &Path) -> Result<(), SystemError> {
        store::save_to_path(path, &self.ledger, &self.registry)?;
        info!(path = %path.display(), "system state saved");
        Ok(())
    }

    /// Load a system from `path`. The decoded chain has already been
    /// validated by the codec; on any failure the current state of the
    /// caller is untouched (this is a constructor).
    pub fn load(path: &Path) -> Result<Self, SystemError> {
        let (ledger, registry) = store::load_from_path(path)?;
        info!(path = %path.display(), blocks = ledger.len(), "system state loaded");
        Ok(Self { ledger, registry })
    }

    /// Load from `path`, degrading to a fresh genesis-only system when the
    /// file is absent, malformed, or corrupt. Collaborators use this at
    /// startup so state corruption never propagates a crash.
    pub fn load_or_new(path: &Path) -> Self {
        match Self::load(path) {
            Ok(system) => system,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "state unusable, starting fresh");
                Self::new()
            }
        }
    }
}
