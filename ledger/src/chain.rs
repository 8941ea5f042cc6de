//! The ledger — the block chain plus the pending-vote staging area.

use crate::block::Block;
use crate::error::{LedgerError, ValidationReason};
use std::collections::BTreeMap;
use tally_types::{Timestamp, Vote, VoterId};

/// Ordered chain of blocks plus staged, not-yet-committed votes.
///
/// The chain is non-empty (genesis first) and append-only; [`Ledger::mine`]
/// is its sole mutator. Staged votes are not part of the immutable record —
/// they are excluded from tallies and from validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Vote>,
}

impl Ledger {
    /// A fresh ledger: genesis-only chain, nothing pending.
    pub fn new(now: Timestamp) -> Self {
        Self {
            chain: vec![Block::genesis(now)],
            pending: Vec::new(),
        }
    }

    /// Rebuild a ledger from persisted parts. Performs no integrity
    /// checking itself; the persistence codec validates after decoding.
    pub fn from_parts(chain: Vec<Block>, pending: Vec<Vote>) -> Self {
        Self { chain, pending }
    }

    /// Stage a vote for the next mined block.
    ///
    /// No uniqueness check happens here — authorization is the registry's
    /// responsibility, enforced by the coordinator before staging.
    pub fn stage(&mut self, vote: Vote) {
        self.pending.push(vote);
    }

    /// Commit all staged votes into a new block appended to the chain.
    ///
    /// Fails with [`LedgerError::NoPendingVotes`] when nothing is staged;
    /// an empty batch would add a meaningless block. On success the pending
    /// area is cleared and the new block is returned.
    pub fn mine(&mut self, now: Timestamp) -> Result<&Block, LedgerError> {
        if self.pending.is_empty() {
            return Err(LedgerError::NoPendingVotes);
        }
        let votes = std::mem::take(&mut self.pending);
        let previous_hash = *self.head().hash();
        let block = Block::new(self.chain.len() as u64, now, votes, previous_hash);
        self.chain.push(block);
        Ok(self.head())
    }

    /// Validate the whole chain, fail-fast at the first bad block.
    ///
    /// Genesis must have index 0 and the zero-sentinel `previous_hash`;
    /// every block must hash-verify; every non-genesis block must link to
    /// its predecessor by index and hash.
    pub fn validate(&self) -> Result<(), LedgerError> {
        // A well-formed ledger always starts at genesis; an empty chain can
        // only come from a hostile document handed to `from_parts`.
        let Some(genesis) = self.chain.first() else {
            return fail(0, ValidationReason::EmptyChain);
        };
        if genesis.index() != 0 {
            return fail(0, ValidationReason::GenesisIndex);
        }
        if !genesis.previous_hash().is_zero() {
            return fail(0, ValidationReason::GenesisPreviousHash);
        }
        if !genesis.verify_hash() {
            return fail(0, ValidationReason::HashMismatch);
        }

        for window in self.chain.windows(2) {
            let (previous, current) = (&window[0], &window[1]);
            let at = current.index();
            if current.index() != previous.index() + 1 {
                return fail(previous.index() + 1, ValidationReason::IndexMismatch);
            }
            if current.previous_hash() != previous.hash() {
                return fail(at, ValidationReason::PreviousHashMismatch);
            }
            if !current.verify_hash() {
                return fail(at, ValidationReason::HashMismatch);
            }
        }
        Ok(())
    }

    /// Per-candidate counts over committed blocks only.
    pub fn tally(&self) -> BTreeMap<String, u64> {
        let mut counts = BTreeMap::new();
        for vote in self.all_votes() {
            *counts.entry(vote.candidate().to_owned()).or_insert(0) += 1;
        }
        counts
    }

    /// Every committed vote, oldest block first.
    pub fn all_votes(&self) -> impl Iterator<Item = &Vote> {
        self.chain.iter().flat_map(|block| block.votes().iter())
    }

    /// Committed votes for one candidate.
    pub fn votes_for<'a>(&'a self, candidate: &'a str) -> impl Iterator<Item = &'a Vote> {
        self.all_votes().filter(move |v| v.candidate() == candidate)
    }

    /// The committed vote cast by a voter, if any.
    pub fn vote_by(&self, voter: &VoterId) -> Option<&Vote> {
        self.all_votes().find(|v| v.voter() == voter)
    }

    /// The most recent block.
    pub fn head(&self) -> &Block {
        self.chain.last().expect("chain always holds genesis")
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn block(&self, index: u64) -> Option<&Block> {
        self.chain.get(index as usize)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Vote] {
        &self.pending
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

fn fail(at_index: u64, reason: ValidationReason) -> Result<(), LedgerError> {
    Err(LedgerError::Validation { at_index, reason })
}
