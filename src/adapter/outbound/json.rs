//! JSON file ledger persistence.
//!
//! Stores the ledger as a flat JSON array in the persisted record layout.
//! Each write goes to a sibling temporary file that is then renamed over the
//! ledger, so a crash mid-write leaves the previous ledger intact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{PersistedRecord, PredictionRecord};
use crate::error::{Error, Result};
use crate::port::LedgerPersistence;

/// File-backed [`LedgerPersistence`].
#[derive(Debug, Clone)]
pub struct JsonFileLedger {
    path: PathBuf,
}

impl JsonFileLedger {
    /// Use the ledger file at `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ledger.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Serialize a ledger to the flat persisted layout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(records: &[PredictionRecord]) -> Result<String> {
    let flat: Vec<PersistedRecord> = records.iter().map(PersistedRecord::from).collect();
    Ok(serde_json::to_string_pretty(&flat)?)
}

/// Parse a ledger from the flat persisted layout, validating every record.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or a record violates a ledger
/// invariant.
pub fn from_json(json: &str) -> Result<Vec<PredictionRecord>> {
    let flat: Vec<PersistedRecord> = serde_json::from_str(json)?;
    flat.into_iter()
        .map(|raw| PredictionRecord::try_from(raw).map_err(Error::from))
        .collect()
}

impl LedgerPersistence for JsonFileLedger {
    fn name(&self) -> &'static str {
        "json"
    }

    fn load(&self) -> Result<Vec<PredictionRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Ledger file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        from_json(&content)
    }

    fn persist(&self, records: &[PredictionRecord]) -> Result<()> {
        let json = to_json(records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        {
            let mut file = fs::File::create(&temp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}
