//! Bounded response cache for chat completions
//!
//! Identical prompts inside one run (duplicate batch texts, retries from the
//! same process) are answered without a second round trip. Entries expire
//! after a TTL and the map never grows past its capacity: each insert first
//! drops expired entries, then the oldest one if still full.

use super::ChatMessage;
use crate::error::Result;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Default lifetime of a cached completion
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Default number of completions kept
pub const DEFAULT_CAPACITY: usize = 1024;

struct CachedCompletion {
    content: String,
    stored_at: Instant,
}

/// In-memory store of completions keyed by request fingerprint
pub struct ResponseCache {
    entries: RwLock<HashMap<u64, CachedCompletion>>,
    ttl: Duration,
    capacity: usize,
}

/// Point-in-time view of the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub live_entries: usize,
    pub expired_entries: usize,
    pub capacity: usize,
}

/// Identifies a completion request; every field changes what the model returns
pub struct RequestFingerprint<'a> {
    pub model: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
    pub messages: &'a [ChatMessage],
}

impl RequestFingerprint<'_> {
    fn digest(&self) -> Result<u64> {
        let mut hasher = DefaultHasher::new();
        self.model.hash(&mut hasher);
        self.temperature.to_bits().hash(&mut hasher);
        self.max_tokens.hash(&mut hasher);
        serde_json::to_string(self.messages)?.hash(&mut hasher);
        Ok(hasher.finish())
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Cached completion for this request, if one is still fresh
    pub fn lookup(&self, request: &RequestFingerprint<'_>) -> Result<Option<String>> {
        let key = request.digest()?;
        let Ok(entries) = self.entries.read() else {
            return Ok(None);
        };
        Ok(entries
            .get(&key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.content.clone()))
    }

    /// Remember a completion, evicting stale and then oldest entries to fit
    pub fn store(&self, request: &RequestFingerprint<'_>, content: String) -> Result<()> {
        let key = request.digest()?;
        let Ok(mut entries) = self.entries.write() else {
            return Ok(());
        };

        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);

        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(k, _)| *k);
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CachedCompletion {
                content,
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        let (live, expired) = match self.entries.read() {
            Ok(entries) => {
                let expired = entries
                    .values()
                    .filter(|entry| entry.stored_at.elapsed() >= self.ttl)
                    .count();
                (entries.len() - expired, expired)
            }
            Err(_) => (0, 0),
        };
        CacheStats {
            live_entries: live,
            expired_entries: expired,
            capacity: self.capacity,
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}
