//! Block — one immutable batch of committed votes.
//!
//! The block hash is SHA-256 over a canonical binary preimage of
//! `(index, timestamp, votes, previous_hash)`:
//!
//! ```text
//! u64:be  index
//! u64:be  timestamp (millis)
//! u64:be  vote count
//!   per vote, in stored order:
//!     u64:be len, bytes  voter id (UTF-8)
//!     u64:be len, bytes  candidate (UTF-8)
//!     u64:be             vote timestamp (millis)
//! 32 bytes               previous_hash
//! ```
//!
//! Fixed field order, big-endian integers, and length-prefixed strings make
//! the digest identical across platforms and implementations; a known-answer
//! test pins the layout.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tally_types::{BlockHash, Timestamp, Vote};

/// A block in the vote chain.
///
/// Fields are never mutated after construction; `hash` is computed once from
/// the other four fields. Tampering is modeled as external corruption of
/// stored bytes, caught by [`Block::verify_hash`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: Timestamp,
    votes: Vec<Vote>,
    previous_hash: BlockHash,
    hash: BlockHash,
}

impl Block {
    /// Construct a block, computing its content hash.
    pub fn new(
        index: u64,
        timestamp: Timestamp,
        votes: Vec<Vote>,
        previous_hash: BlockHash,
    ) -> Self {
        let hash = content_hash(index, timestamp, &votes, &previous_hash);
        Self {
            index,
            timestamp,
            votes,
            previous_hash,
            hash,
        }
    }

    /// The genesis block: index 0, no votes, zero-sentinel predecessor.
    pub fn genesis(timestamp: Timestamp) -> Self {
        Self::new(0, timestamp, Vec::new(), BlockHash::ZERO)
    }

    /// Recompute the digest from stored fields and compare to the stored
    /// hash.
    pub fn verify_hash(&self) -> bool {
        content_hash(self.index, self.timestamp, &self.votes, &self.previous_hash) == self.hash
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn previous_hash(&self) -> &BlockHash {
        &self.previous_hash
    }

    pub fn hash(&self) -> &BlockHash {
        &self.hash
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }
}

/// SHA-256 over the canonical block preimage.
fn content_hash(
    index: u64,
    timestamp: Timestamp,
    votes: &[Vote],
    previous_hash: &BlockHash,
) -> BlockHash {
    let mut hasher = Sha256::new();
    hasher.update(index.to_be_bytes());
    hasher.update(timestamp.as_millis().to_be_bytes());
    hasher.update((votes.len() as u64).to_be_bytes());
    for vote in votes {
        let voter = vote.voter().as_str().as_bytes();
        hasher.update((voter.len() as u64).to_be_bytes());
        hasher.update(voter);
        let candidate = vote.candidate().as_bytes();
        hasher.update((candidate.len() as u64).to_be_bytes());
        hasher.update(candidate);
        hasher.update(vote.timestamp().as_millis().to_be_bytes());
    }
    hasher.update(previous_hash.as_bytes());

    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    BlockHash::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(voter: &str, candidate: &str, millis: u64) -> Vote {
        Vote::new(voter, candidate, Timestamp::new(millis)).unwrap()
    }

    #[test]
    fn hash_is_deterministic() {
        let votes = vec![vote("alice", "candidate-x", 1000)];
        let a = Block::new(1, Timestamp::new(2000), votes.clone(), BlockHash::ZERO);
        let b = Block::new(1, Timestamp::new(2000), votes, BlockHash::ZERO);
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn hash_depends_on_every_field() {
        let base = Block::new(1, Timestamp::new(2000), vec![vote("alice", "x", 1000)], BlockHash::ZERO);

        let other_index = Block::new(2, Timestamp::new(2000), vec![vote("alice", "x", 1000)], BlockHash::ZERO);
        let other_time = Block::new(1, Timestamp::new(2001), vec![vote("alice", "x", 1000)], BlockHash::ZERO);
        let other_vote = Block::new(1, Timestamp::new(2000), vec![vote("alice", "y", 1000)], BlockHash::ZERO);
        let other_prev = Block::new(1, Timestamp::new(2000), vec![vote("alice", "x", 1000)], BlockHash::new([0x01; 32]));

        assert_ne!(base.hash(), other_index.hash());
        assert_ne!(base.hash(), other_time.hash());
        assert_ne!(base.hash(), other_vote.hash());
        assert_ne!(base.hash(), other_prev.hash());
    }

    #[test]
    fn vote_order_matters() {
        let a = Block::new(
            1,
            Timestamp::new(1),
            vec![vote("alice", "x", 1), vote("bob", "y", 2)],
            BlockHash::ZERO,
        );
        let b = Block::new(
            1,
            Timestamp::new(1),
            vec![vote("bob", "y", 2), vote("alice", "x", 1)],
            BlockHash::ZERO,
        );
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn length_prefixes_prevent_field_bleed() {
        // "ab" + "c" must not hash like "a" + "bc".
        let a = Block::new(1, Timestamp::new(1), vec![vote("ab", "c", 1)], BlockHash::ZERO);
        let b = Block::new(1, Timestamp::new(1), vec![vote("a", "bc", 1)], BlockHash::ZERO);
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn verify_hash_holds_for_fresh_block() {
        let block = Block::new(3, Timestamp::new(500), vec![vote("alice", "x", 400)], BlockHash::new([0xAA; 32]));
        assert!(block.verify_hash());
    }

    #[test]
    fn genesis_shape() {
        let genesis = Block::genesis(Timestamp::new(1234));
        assert!(genesis.is_genesis());
        assert_eq!(genesis.index(), 0);
        assert!(genesis.votes().is_empty());
        assert!(genesis.previous_hash().is_zero());
        assert!(genesis.verify_hash());
    }

    /// Pins the canonical preimage layout. Any change to field order,
    /// endianness, or length prefixing breaks these digests.
    #[test]
    fn known_answer_digests() {
        let genesis = Block::genesis(Timestamp::EPOCH);
        assert_eq!(
            genesis.hash().to_hex(),
            "d4817aa5497628e7c77e6b606107042bbba3130888c5f47a375e6179be789fbb",
        );

        let block = Block::new(
            1,
            Timestamp::new(1_700_000_000_000),
            vec![vote("alice", "candidate-x", 1_699_999_999_999)],
            BlockHash::new([0x11; 32]),
        );
        assert_eq!(
            block.hash().to_hex(),
            "172116204b1c3ce137c09a95b2dc9b4e3bf1169f9b8db0b9f91fbc29914d509e",
        );
    }

    #[test]
    fn serde_roundtrip_preserves_hash() {
        let block = Block::new(1, Timestamp::new(99), vec![vote("alice", "x", 98)], BlockHash::ZERO);
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
        assert!(back.verify_hash());
    }

    #[test]
    fn tampered_serialized_block_fails_verify() {
        let block = Block::new(1, Timestamp::new(99), vec![vote("alice", "x", 98)], BlockHash::ZERO);
        let json = serde_json::to_string(&block).unwrap();
        let tampered = json.replace("\"candidate\":\"x\"", "\"candidate\":\"y\"");
        let back: Block = serde_json::from_str(&tampered).unwrap();
        assert!(!back.verify_hash());
    }
}
