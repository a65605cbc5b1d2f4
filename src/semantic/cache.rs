//! Persistent embedding cache.
//!
//! A flat key → vector map, keyed by a content hash of (text, context, model
//! identifier). Writers are append-only and same-key writes are idempotent,
//! so concurrent assessments cannot corrupt the map; a racing reader at worst
//! misses and recomputes. `cleanup()` is the periodic-maintenance entry
//! point; today it only flushes to disk.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use siphasher::sip::SipHasher13;

use crate::error::AssessmentError;

const KEY_SEED_K0: u64 = 0x61c8_8646_80b5_83eb;
const KEY_SEED_K1: u64 = 0x3c79_ac49_2ba7_b653;

pub struct EmbeddingCache {
    path: Option<PathBuf>,
    entries: Mutex<HashMap<String, Vec<f32>>>,
}

impl EmbeddingCache {
    /// Memory-only cache; nothing survives the process.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Opens a disk-backed cache, loading any previous contents. An
    /// unreadable or corrupt file degrades to an empty cache with a warning;
    /// it never fails the caller.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<HashMap<String, Vec<f32>>>(&bytes) {
                Ok(map) => map,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "embedding cache unreadable; starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path: Some(path),
            entries: Mutex::new(entries),
        }
    }

    /// Content-hash key over (text, context, model identifier).
    pub fn key(text: &str, context: &str, model_id: &str) -> String {
        let mut hasher = SipHasher13::new_with_keys(KEY_SEED_K0, KEY_SEED_K1);
        text.hash(&mut hasher);
        context.hash(&mut hasher);
        model_id.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.entries
            .lock()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }

    pub fn put(&self, key: String, vector: Vec<f32>) {
        if let Ok(mut map) = self.entries.lock() {
            map.insert(key, vector);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the current map to disk. A no-op for memory-only caches.
    pub fn flush(&self) -> Result<(), AssessmentError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let snapshot = self
            .entries
            .lock()
            .map_err(|_| AssessmentError::Internal("embedding cache mutex poisoned".into()))?
            .clone();
        let bytes = serde_json::to_vec(&snapshot)
            .map_err(|err| AssessmentError::Internal(err.to_string()))?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Periodic maintenance hook. Currently flush-only; expiry would slot in
    /// here if the cache ever needs it.
    pub fn cleanup(&self) {
        if let Err(err) = self.flush() {
            tracing::warn!(error = %err, "embedding cache flush failed during cleanup");
        }
    }
}
