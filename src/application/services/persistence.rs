//! Persistence gateway for radial snapshots
//!
//! Snapshots are stored as JSON arrays of `{name, value, price?, children?}`
//! under two fixed keys: the live snapshot, rewritten after every change, and
//! a backup that is only written on explicit request.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::RadialNode;
use crate::infrastructure::traits::KeyValueStore;

/// Reads and writes radial snapshots through a key-value store.
pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
    live_key: String,
    backup_key: String,
}

impl PersistenceGateway {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        live_key: impl Into<String>,
        backup_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            live_key: live_key.into(),
            backup_key: backup_key.into(),
        }
    }

    /// Live snapshot, empty when nothing was stored yet.
    ///
    /// Malformed JSON is an error; the data is self-produced, so it is not
    /// repaired.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self) -> ApplicationResult<Vec<RadialNode>> {
        Ok(self.read(&self.live_key)?.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self, snapshot))]
    pub fn store(&self, snapshot: &[RadialNode]) -> ApplicationResult<()> {
        self.write(&self.live_key, snapshot)
    }

    /// Copy `snapshot` to the backup key.
    #[instrument(level = "debug", skip(self, snapshot))]
    pub fn backup(&self, snapshot: &[RadialNode]) -> ApplicationResult<()> {
        self.write(&self.backup_key, snapshot)?;
        info!("backup written under key {:?}", self.backup_key);
        Ok(())
    }

    /// Last manual backup; `None` when no backup was ever written, which is
    /// distinct from a backup of an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn load_backup(&self) -> ApplicationResult<Option<Vec<RadialNode>>> {
        self.read(&self.backup_key)
    }

    pub fn backup_key(&self) -> &str {
        &self.backup_key
    }

    fn read(&self, key: &str) -> ApplicationResult<Option<Vec<RadialNode>>> {
        let Some(raw) = self.store.get(key).with_key_context("read snapshot", key)? else {
            debug!("no snapshot under key {:?}", key);
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| ApplicationError::Snapshot {
                key: key.to_string(),
                source,
            })
    }

    fn write(&self, key: &str, snapshot: &[RadialNode]) -> ApplicationResult<()> {
        let raw = serde_json::to_string(snapshot).map_err(|source| ApplicationError::Snapshot {
            key: key.to_string(),
            source,
        })?;
        self.store
            .set(key, &raw)
            .with_key_context("write snapshot", key)?;
        debug!("stored {} roots under key {:?}", snapshot.len(), key);
        Ok(())
    }
}
