//! Debrief export.
//!
//! A finished run is written once as pretty JSON, grouped by session:
//! `{root}/{session_id}/{debrief_id}.json`. Only debriefs whose content hash
//! still matches are written.

use std::fs;
use std::path::PathBuf;

use crate::{Debrief, DebriefId};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Debrief {0} has no content hash (not finalized)")]
    NotFinalized(DebriefId),

    #[error("Debrief {0} was modified after finalization")]
    IntegrityViolation(DebriefId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Destination for finished debriefs.
pub trait DebriefStore {
    /// Write a finalized debrief and return where it landed.
    fn save(&self, debrief: &Debrief) -> Result<PathBuf, StoreError>;
}

/// Writes debriefs under a directory on disk.
pub struct FileDebriefStore {
    root: PathBuf,
}

impl FileDebriefStore {
    /// Create the export directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn session_dir(&self, debrief: &Debrief) -> PathBuf {
        self.root.join(debrief.session_id.0.to_string())
    }
}

impl DebriefStore for FileDebriefStore {
    fn save(&self, debrief: &Debrief) -> Result<PathBuf, StoreError> {
        if debrief.content_hash.is_none() {
            return Err(StoreError::NotFinalized(debrief.id));
        }
        if !debrief.verify_integrity() {
            return Err(StoreError::IntegrityViolation(debrief.id));
        }

        let dir = self.session_dir(debrief);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.json", debrief.id));
        fs::write(&path, serde_json::to_string_pretty(debrief)?)?;

        tracing::debug!(
            debrief_id = %debrief.id,
            session_id = %debrief.session_id,
            path = %path.display(),
            "Debrief written"
        );
        Ok(path)
    }
}
