//! Stores for the three vendor work record types.
//!
//! Records are stored as individual JSON files organized by vendor, one
//! subdirectory per record type. List operations tolerate individual
//! unreadable files (they are skipped with a warning) so one damaged
//! record never takes a whole vendor's agenda down with it.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use liaison_models::{ActionItem, Blocker, DiscussionTopic, ItemId, VendorId};

use crate::atomic::{load_json, write_json_atomic};
use crate::error::{PersistenceError, Result};

/// A record type that knows where and under what name it is stored.
trait StoredRecord: Serialize + DeserializeOwned {
    /// Human-readable kind used in errors.
    const KIND: &'static str;
    /// Directory name under the vendor directory.
    const DIR: &'static str;

    fn id(&self) -> &ItemId;
    fn vendor_id(&self) -> &VendorId;
    fn first_raised_at(&self) -> Option<DateTime<Utc>>;
}

impl StoredRecord for Blocker {
    const KIND: &'static str = "blocker";
    const DIR: &'static str = "blockers";

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn vendor_id(&self) -> &VendorId {
        &self.vendor_id
    }

    fn first_raised_at(&self) -> Option<DateTime<Utc>> {
        self.first_raised_at
    }
}

impl StoredRecord for ActionItem {
    const KIND: &'static str = "action item";
    const DIR: &'static str = "action_items";

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn vendor_id(&self) -> &VendorId {
        &self.vendor_id
    }

    fn first_raised_at(&self) -> Option<DateTime<Utc>> {
        self.first_raised_at
    }
}

impl StoredRecord for DiscussionTopic {
    const KIND: &'static str = "discussion topic";
    const DIR: &'static str = "topics";

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn vendor_id(&self) -> &VendorId {
        &self.vendor_id
    }

    fn first_raised_at(&self) -> Option<DateTime<Utc>> {
        self.first_raised_at
    }
}

fn record_dir<R: StoredRecord>(base: &Path, vendor: &VendorId) -> PathBuf {
    base.join("vendors").join(vendor.as_str()).join(R::DIR)
}

fn record_path<R: StoredRecord>(base: &Path, vendor: &VendorId, id: &ItemId) -> PathBuf {
    record_dir::<R>(base, vendor).join(format!("{}.json", id))
}

fn save_record<R: StoredRecord>(base: &Path, record: &R) -> Result<()> {
    let path = record_path::<R>(base, record.vendor_id(), record.id());
    write_json_atomic(&path, record)
}

fn load_record<R: StoredRecord>(base: &Path, vendor: &VendorId, id: &ItemId) -> Result<R> {
    let path = record_path::<R>(base, vendor, id);
    if !path.exists() {
        return Err(PersistenceError::NotFound {
            kind: R::KIND,
            id: id.to_string(),
        });
    }
    load_json(&path)
}

/// Lists every record of one type for a vendor, oldest raised first.
///
/// Files that fail to load are skipped, not fatal.
fn list_records<R: StoredRecord>(base: &Path, vendor: &VendorId) -> Result<Vec<R>> {
    let dir = record_dir::<R>(base, vendor);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&dir).map_err(|source| PersistenceError::ReadError {
        path: dir.clone(),
        source,
    })?;

    let mut records = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PersistenceError::ReadError {
            path: dir.clone(),
            source,
        })?;

        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            match load_json::<R>(&path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(kind = R::KIND, path = %path.display(), error = %e, "skipping unreadable record");
                }
            }
        }
    }

    // Deterministic original sequence: oldest raised first, id as tiebreak.
    records.sort_by(|a, b| {
        a.first_raised_at()
            .cmp(&b.first_raised_at())
            .then_with(|| a.id().cmp(b.id()))
    });

    Ok(records)
}

fn delete_record<R: StoredRecord>(base: &Path, vendor: &VendorId, id: &ItemId) -> Result<()> {
    let path = record_path::<R>(base, vendor, id);
    if path.exists() {
        fs::remove_file(&path).map_err(|source| PersistenceError::WriteError { path, source })?;
    }
    Ok(())
}

fn update_record<R, F>(base: &Path, vendor: &VendorId, id: &ItemId, apply: F) -> Result<R>
where
    R: StoredRecord,
    F: FnOnce(&mut R),
{
    let mut record = load_record::<R>(base, vendor, id)?;
    apply(&mut record);
    save_record(base, &record)?;
    Ok(record)
}

macro_rules! record_store {
    ($(#[$doc:meta])* $name:ident, $record:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            base_path: PathBuf,
        }

        impl $name {
            /// Creates a store rooted at the given base path.
            pub fn new(base_path: impl Into<PathBuf>) -> Self {
                Self {
                    base_path: base_path.into(),
                }
            }

            /// Saves a record, creating directories as needed.
            pub fn save(&self, record: &$record) -> Result<()> {
                save_record(&self.base_path, record)
            }

            /// Loads one record by id.
            pub fn load(&self, vendor: &VendorId, id: &ItemId) -> Result<$record> {
                load_record(&self.base_path, vendor, id)
            }

            /// Lists all records for a vendor, oldest raised first.
            pub fn list(&self, vendor: &VendorId) -> Result<Vec<$record>> {
                list_records(&self.base_path, vendor)
            }

            /// Permanently deletes one record. Missing records are fine.
            pub fn delete(&self, vendor: &VendorId, id: &ItemId) -> Result<()> {
                delete_record::<$record>(&self.base_path, vendor, id)
            }

            /// Read-modify-write helper; returns the stored result.
            pub fn update<F>(&self, vendor: &VendorId, id: &ItemId, apply: F) -> Result<$record>
            where
                F: FnOnce(&mut $record),
            {
                update_record(&self.base_path, vendor, id, apply)
            }
        }
    };
}

record_store!(
    /// Persistence for [`Blocker`] records.
    BlockerStore,
    Blocker
);

record_store!(
    /// Persistence for [`ActionItem`] records.
    ActionItemStore,
    ActionItem
);

record_store!(
    /// Persistence for [`DiscussionTopic`] records.
    TopicStore,
    DiscussionTopic
);

/// All three record stores over one state directory.
///
/// This is the handle the queue controller and CLI share; cloning is
/// cheap and the stores are safe to use from spawned write tasks.
#[derive(Debug, Clone)]
pub struct AgendaStore {
    /// Blocker records.
    pub blockers: BlockerStore,
    /// Action item records.
    pub actions: ActionItemStore,
    /// Discussion topic records.
    pub topics: TopicStore,
}

impl AgendaStore {
    /// Creates the three stores over a shared base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base = base_path.into();
        Self {
            blockers: BlockerStore::new(&base),
            actions: ActionItemStore::new(&base),
            topics: TopicStore::new(&base),
        }
    }
}
