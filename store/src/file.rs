//! Atomic state-file persistence.
//!
//! Saves write the full document to a named temporary file in the target's
//! directory, then atomically rename it over the target. A crashed or
//! failed save leaves the previous file intact and the temporary is
//! removed on every exit path (the guard deletes it on drop).

use crate::document;
use crate::error::StoreError;
use std::io::Write;
use std::path::Path;
use tally_ledger::Ledger;
use tally_registry::VoterRegistry;
use tempfile::NamedTempFile;
use tracing::debug;

/// Atomically write the encoded state document to `path`.
pub fn save_to_path(
    path: &Path,
    ledger: &Ledger,
    registry: &VoterRegistry,
) -> Result<(), StoreError> {
    let bytes = document::encode(ledger, registry)?;

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => NamedTempFile::new_in(dir)?,
        None => NamedTempFile::new_in(".")?,
    };
    tmp.write_all(&bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "state saved");
    Ok(())
}

/// Read and decode the state document at `path`.
pub fn load_from_path(path: &Path) -> Result<(Ledger, VoterRegistry), StoreError> {
    let bytes = std::fs::read(path)?;
    let (ledger, registry) = document::decode(&bytes)?;
    debug!(path = %path.display(), blocks = ledger.len(), "state loaded");
    Ok((ledger, registry))
}
