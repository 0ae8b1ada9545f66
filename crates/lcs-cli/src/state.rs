use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use lcs_contract::ContractConfig;
use lcs_ledger::{InMemoryLedger, LedgerSnapshot};

/// Load the ledger snapshot at `path`, or an empty ledger if there is none.
pub fn load_ledger(path: &Path) -> anyhow::Result<InMemoryLedger> {
    if !path.exists() {
        return Ok(InMemoryLedger::new());
    }
    let raw = std::fs::read(path)
        .with_context(|| format!("reading ledger state {}", path.display()))?;
    let snapshot: LedgerSnapshot = serde_json::from_slice(&raw)
        .with_context(|| format!("parsing ledger state {}", path.display()))?;
    Ok(InMemoryLedger::from_snapshot(snapshot))
}

/// Write the committed state of `ledger` to `path`, replacing it atomically.
pub fn save_ledger(path: &Path, ledger: &InMemoryLedger) -> anyhow::Result<()> {
    let snapshot = ledger.snapshot()?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut file, &snapshot)?;
    file.write_all(b"\n")?;
    file.persist(path)
        .with_context(|| format!("writing ledger state {}", path.display()))?;

    debug!(path = %path.display(), height = snapshot.height, "ledger state saved");
    Ok(())
}

/// Load the configuration file, or the defaults if none was given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ContractConfig> {
    let Some(path) = path else {
        return Ok(ContractConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    Ok(ContractConfig::from_toml(&raw)?)
}
