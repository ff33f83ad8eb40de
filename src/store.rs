//! Hit storage - append-only log with in-memory fallback

use crate::core::hit::Hit;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage abstraction over the hit sequence.
///
/// Handlers receive this as `Arc<dyn HitStore>`; production wires
/// [`FileStore`], tests substitute [`MemoryStore`].
pub trait HitStore: Send + Sync {
    /// Append one hit. Never fails the caller; durable implementations
    /// absorb write errors into a non-durable fallback.
    fn append(&self, hit: Hit);

    /// The complete hit sequence in storage order.
    fn read_all(&self) -> Vec<Hit>;
}

/// Plain in-memory hit list.
#[derive(Debug, Default)]
pub struct MemoryStore {
    hits: Mutex<Vec<Hit>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hits.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HitStore for MemoryStore {
    fn append(&self, hit: Hit) {
        self.hits.lock().unwrap().push(hit);
    }

    fn read_all(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }
}

/// Durable newline-delimited JSON log, one record per hit, appended in
/// arrival order. Hits that cannot be written durably are held in a
/// process-lifetime memory fallback instead; the two are never reconciled.
pub struct FileStore {
    path: PathBuf,
    fallback: MemoryStore,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fallback: MemoryStore::new(),
        }
    }

    fn append_line(&self, hit: &Hit) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(hit)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    /// Parse the whole log. Any read or parse failure means "no durable
    /// hits"; a partial log is never surfaced.
    fn read_log(path: &Path) -> Vec<Hit> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!("no readable hit log at {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        let parsed: Result<Vec<Hit>, _> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect();

        match parsed {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!("hit log {} is corrupt, ignoring it: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}

impl HitStore for FileStore {
    fn append(&self, hit: Hit) {
        if let Err(e) = self.append_line(&hit) {
            tracing::warn!(
                "durable append to {} failed, holding hit in memory: {}",
                self.path.display(),
                e
            );
            self.fallback.append(hit);
        }
    }

    fn read_all(&self) -> Vec<Hit> {
        let mut hits = Self::read_log(&self.path);
        hits.extend(self.fallback.read_all());
        hits
    }
}
