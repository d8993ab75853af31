// src/identity.rs
//! Surrogate developer identities.
//!
//! Raw activity records identify developers by account handle. Every
//! handle is interned into a small numeric surrogate id, allocated in
//! first-seen order. The registry is built once per run and passed by
//! reference into the aggregation stage; the mapping is injective and
//! stable for the duration of the run.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{MinerError, Result};

/// Surrogate developer id. Ids start at 1 to match the exported mapping.
pub type DevId = u32;

/// Injective handle -> id registry, first-seen order.
#[derive(Debug, Clone, Default)]
pub struct DevRegistry {
    ids: HashMap<String, DevId>,
    handles: Vec<String>,
}

impl DevRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `handle`, allocating the next id if unseen.
    pub fn intern(&mut self, handle: &str) -> DevId {
        if let Some(&id) = self.ids.get(handle) {
            return id;
        }
        self.handles.push(handle.to_string());
        let id = self.handles.len() as DevId;
        self.ids.insert(handle.to_string(), id);
        id
    }

    /// Returns the id for `handle` without allocating.
    #[must_use]
    pub fn get(&self, handle: &str) -> Option<DevId> {
        self.ids.get(handle).copied()
    }

    /// Returns the handle behind a surrogate id.
    #[must_use]
    pub fn handle_of(&self, id: DevId) -> Option<&str> {
        if id == 0 {
            return None;
        }
        self.handles.get(id as usize - 1).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Writes the handle -> id mapping as pretty JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.ids)?;
        fs::write(path, json).map_err(|e| MinerError::io(e, path))
    }

    /// Reloads a registry saved by [`DevRegistry::save`].
    ///
    /// # Errors
    /// Returns an error if the file is unreadable or the mapping is not
    /// injective over a contiguous 1..=n id range.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| MinerError::io(e, path))?;
        let ids: HashMap<String, DevId> = serde_json::from_str(&content)?;

        let mut handles = vec![String::new(); ids.len()];
        for (handle, &id) in &ids {
            let idx = id
                .checked_sub(1)
                .map(|i| i as usize)
                .filter(|&i| i < handles.len())
                .ok_or_else(|| {
                    MinerError::Other(format!("identity map id {id} out of range"))
                })?;
            if !handles[idx].is_empty() {
                return Err(MinerError::Other(format!(
                    "identity map assigns id {id} twice"
                )));
            }
            handles[idx] = handle.clone();
        }

        Ok(Self { ids, handles })
    }
}
