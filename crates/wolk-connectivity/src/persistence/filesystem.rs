//! Directory-backed persistence.
//!
//! Each message is one file named `reading_<N>` holding the JSON encoding of
//! the envelope. `N` increases monotonically and resumes after the highest
//! index found on disk, so a restarted device keeps draining what it left
//! behind. When a size limit is set, the oldest files are evicted first,
//! whatever the read order.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use wolk_core::Message;
use wolk_core::config::env_vars;
use wolk_core::config::persistence::READING_FILE_PREFIX;

use super::MessagePersistence;
use crate::error::Result;

/// Which stored message `front` yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceMode {
    /// Oldest first.
    #[default]
    Fifo,
    /// Newest first.
    Lifo,
}

#[derive(Debug, Default)]
struct Index {
    /// Stored file indices, oldest first.
    entries: VecDeque<(u64, u64)>,
    next: u64,
    total_size: u64,
}

pub struct FilesystemMessagePersistence {
    dir: PathBuf,
    mode: PersistenceMode,
    size_limit: u64,
    index: Mutex<Index>,
}

impl FilesystemMessagePersistence {
    /// Open (or create) `dir` and pick up any messages already stored there.
    pub fn new(dir: impl Into<PathBuf>, mode: PersistenceMode) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let Some(number) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_prefix(READING_FILE_PREFIX))
                .and_then(|n| n.parse::<u64>().ok())
            else {
                continue;
            };
            entries.push((number, entry.metadata()?.len()));
        }
        entries.sort_unstable();

        let index = Index {
            next: entries.last().map_or(0, |(n, _)| n + 1),
            total_size: entries.iter().map(|(_, size)| size).sum(),
            entries: entries.into(),
        };
        tracing::debug!(
            dir = %dir.display(),
            stored = index.entries.len(),
            "Opened message persistence"
        );

        Ok(Self {
            dir,
            mode,
            size_limit: 0,
            index: Mutex::new(index),
        })
    }

    /// Like [`new`](Self::new), with the size limit taken from
    /// `WOLK_STORAGE_LIMIT_BYTES` (unbounded when unset).
    pub fn from_env(dir: impl Into<PathBuf>, mode: PersistenceMode) -> Result<Self> {
        Ok(Self::new(dir, mode)?.with_size_limit(env_vars::storage_limit_bytes()))
    }

    pub fn size_limit(&self) -> u64 {
        self.size_limit
    }

    /// Cap the total size of stored files in bytes. Zero means unbounded.
    pub fn with_size_limit(mut self, bytes: u64) -> Self {
        self.size_limit = bytes;
        self.evict(&mut self.index.lock());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    /// Total bytes currently stored.
    pub fn total_size(&self) -> u64 {
        self.index.lock().total_size
    }

    fn path(&self, number: u64) -> PathBuf {
        self.dir.join(format!("{READING_FILE_PREFIX}{number}"))
    }

    fn current(&self, index: &Index) -> Option<(u64, u64)> {
        match self.mode {
            PersistenceMode::Fifo => index.entries.front().copied(),
            PersistenceMode::Lifo => index.entries.back().copied(),
        }
    }

    // The newest file is never evicted.
    fn evict(&self, index: &mut Index) {
        if self.size_limit == 0 {
            return;
        }
        while index.total_size > self.size_limit && index.entries.len() > 1 {
            let Some((number, size)) = index.entries.pop_front() else {
                break;
            };
            index.total_size -= size;
            if let Err(e) = fs::remove_file(self.path(number)) {
                tracing::warn!(number, error = %e, "Failed to evict persisted message");
            } else {
                tracing::debug!(number, size, "Evicted persisted message over size limit");
            }
        }
    }
}

impl MessagePersistence for FilesystemMessagePersistence {
    fn push(&self, message: Message) -> bool {
        let bytes = match serde_json::to_vec(&message) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode message for persistence");
                return false;
            }
        };

        let mut index = self.index.lock();
        let number = index.next;
        if let Err(e) = fs::write(self.path(number), &bytes) {
            tracing::error!(number, error = %e, "Failed to persist message");
            return false;
        }

        let size = bytes.len() as u64;
        index.next += 1;
        index.total_size += size;
        index.entries.push_back((number, size));
        self.evict(&mut index);
        true
    }

    fn pop(&self) {
        let mut index = self.index.lock();
        let Some((number, size)) = self.current(&index) else {
            return;
        };

        if let Err(e) = fs::remove_file(self.path(number)) {
            tracing::warn!(number, error = %e, "Failed to remove persisted message");
        }
        match self.mode {
            PersistenceMode::Fifo => index.entries.pop_front(),
            PersistenceMode::Lifo => index.entries.pop_back(),
        };
        index.total_size -= size;
    }

    fn front(&self) -> Option<Message> {
        let index = self.index.lock();
        let (number, _) = self.current(&index)?;

        let bytes = match fs::read(self.path(number)) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(number, error = %e, "Failed to read persisted message");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::error!(number, error = %e, "Failed to decode persisted message");
                None
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.index.lock().entries.is_empty()
    }

    fn len(&self) -> usize {
        self.index.lock().entries.len()
    }
}
