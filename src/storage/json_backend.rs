use std::{
    fs,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::{
    domain::{Account, Entry, HouseholdSnapshot, RecurringTransaction},
    errors::{ProjectionError, Result},
    projection::DateWindow,
    utils::paths::{ensure_dir, households_dir_in, resolve_base, write_atomic},
};

use super::{snapshot_entries, FinancialDataSource, InMemorySource};

const SNAPSHOT_EXTENSION: &str = "json";

/// Household snapshots stored as one pretty-printed JSON file per household.
///
/// Each [`FinancialDataSource`] call reads and parses the household file again, so a
/// cold [`ProjectionService`](crate::core::ProjectionService) reads it once per fetch.
/// Use [`JsonSnapshotStore::load_source`] to parse it a single time.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    root: PathBuf,
    households_dir: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = resolve_base(root);
        ensure_dir(&root)?;
        let households_dir = households_dir_in(&root);
        ensure_dir(&households_dir)?;
        Ok(Self {
            root,
            households_dir,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self, family_id: Uuid) -> PathBuf {
        self.households_dir
            .join(format!("{}.{}", family_id, SNAPSHOT_EXTENSION))
    }

    pub fn save_snapshot(&self, snapshot: &HouseholdSnapshot) -> Result<()> {
        save_snapshot_to_path(snapshot, &self.snapshot_path(snapshot.family_id))
    }

    pub fn load_snapshot(&self, family_id: Uuid) -> Result<HouseholdSnapshot> {
        let path = self.snapshot_path(family_id);
        if !path.exists() {
            return Err(ProjectionError::HouseholdNotFound(family_id));
        }
        let snapshot = load_snapshot_from_path(&path)?;
        if snapshot.family_id != family_id {
            return Err(ProjectionError::Storage(format!(
                "snapshot `{}` belongs to household {}",
                path.display(),
                snapshot.family_id
            )));
        }
        Ok(snapshot)
    }

    /// Reads one household file into an in-memory source.
    pub fn load_source(&self, family_id: Uuid) -> Result<InMemorySource> {
        Ok(InMemorySource::new().with_snapshot(self.load_snapshot(family_id)?))
    }

    /// Household ids with a stored snapshot, sorted.
    pub fn list_households(&self) -> Result<Vec<Uuid>> {
        if !self.households_dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.households_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            let parsed = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| Uuid::parse_str(stem).ok());
            match parsed {
                Some(id) => ids.push(id),
                None => {
                    tracing::warn!(path = %path.display(), "ignoring unrecognized snapshot file")
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl FinancialDataSource for JsonSnapshotStore {
    fn accounts(&self, family_id: Uuid) -> Result<Vec<Account>> {
        Ok(self.load_snapshot(family_id)?.accounts)
    }

    fn entries_between(
        &self,
        family_id: Uuid,
        window: &DateWindow,
        account_ids: Option<&[Uuid]>,
    ) -> Result<Vec<Entry>> {
        let snapshot = self.load_snapshot(family_id)?;
        Ok(snapshot_entries(&snapshot, window, account_ids))
    }

    fn recurring_transactions(&self, family_id: Uuid) -> Result<Vec<RecurringTransaction>> {
        Ok(self.load_snapshot(family_id)?.recurring)
    }
}

/// Writes a snapshot to disk atomically by staging to a temporary file.
pub fn save_snapshot_to_path(snapshot: &HouseholdSnapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    write_atomic(path, &json)
}

/// Loads a snapshot from disk, returning structured errors on failure.
pub fn load_snapshot_from_path(path: &Path) -> Result<HouseholdSnapshot> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
