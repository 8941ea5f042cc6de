//! tallychain CLI — a thin collaborator over the voting coordinator.
//!
//! State persists between invocations through a JSON state file: each
//! command loads (falling back to a fresh system if the file is absent or
//! unusable), performs one operation, and saves atomically.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally_system::VotingSystem;

#[derive(Parser)]
#[command(name = "tallychain", about = "Append-only voting ledger with tamper detection")]
struct Cli {
    /// Path to the state file.
    #[arg(long, default_value = "tallychain_state.json", env = "TALLYCHAIN_STATE")]
    state: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a voter.
    Register {
        /// Unique voter id.
        voter_id: String,
    },
    /// Cast a vote (stages it for the next mined block).
    Vote {
        voter_id: String,
        candidate: String,
    },
    /// Commit all pending votes into a new block.
    Mine,
    /// Show per-candidate results over committed blocks.
    Results,
    /// Verify chain integrity end to end.
    Validate,
    /// Show headline counts.
    Status,
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut system = VotingSystem::load_or_new(&cli.state);

    match cli.command {
        Command::Register { ref voter_id } => {
            system.register_voter(voter_id.as_str())?;
            println!("registered voter {voter_id}");
            save(&system, &cli)?;
        }
        Command::Vote { ref voter_id, ref candidate } => {
            system.cast_vote(voter_id.as_str(), candidate.as_str())?;
            println!("vote for {candidate} staged ({} pending)", system.pending_count());
            save(&system, &cli)?;
        }
        Command::Mine => {
            let block = system.mine_pending()?;
            println!(
                "mined block {} with {} votes ({})",
                block.index, block.vote_count, block.hash,
            );
            save(&system, &cli)?;
        }
        Command::Results => {
            let results = system.results();
            if results.is_empty() {
                println!("no committed votes");
            }
            for (candidate, count) in results {
                println!("{candidate}: {count}");
            }
        }
        Command::Validate => {
            system.validate()?;
            println!("chain valid ({} blocks)", system.ledger().len());
        }
        Command::Status => {
            let summary = system.summary();
            println!("blocks: {}", summary.blocks);
            println!("committed votes: {}", summary.committed_votes);
            println!("pending votes: {}", summary.pending_votes);
            println!("registered voters: {}", summary.registered_voters);
            println!("voted: {}", summary.voted_voters);
        }
    }

    Ok(())
}

fn save(system: &VotingSystem, cli: &Cli) -> anyhow::Result<()> {
    system
        .save(&cli.state)
        .with_context(|| format!("saving state to {}", cli.state.display()))
}
