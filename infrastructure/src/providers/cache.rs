//! Response cache with TTL and FIFO eviction
//!
//! Keys combine agent id and a hash of the composed prompt, so a changed
//! context produces a fresh entry. Eviction when full is by insertion
//! order, not recency — a known limitation kept for predictability: a hot
//! entry still ages out on schedule.

use roundtable_domain::prompt::Prompt;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Entries expire this long after insertion
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum live entries before FIFO eviction kicks in
pub const CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    agent_id: String,
    prompt_hash: u64,
}

struct CacheEntry {
    content: String,
    provider: String,
    inserted_at: Instant,
}

struct CacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    insertion_order: VecDeque<CacheKey>,
}

/// Thread-safe response cache. Lock scope is lookup/insert only.
pub struct ResponseCache {
    inner: Mutex<CacheInner>,
    ttl: Duration,
    capacity: usize,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(CACHE_TTL, CACHE_CAPACITY)
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
            ttl,
            capacity,
        }
    }

    fn key(agent_id: &str, prompt: &Prompt) -> CacheKey {
        let mut hasher = DefaultHasher::new();
        prompt.system.hash(&mut hasher);
        prompt.user.hash(&mut hasher);
        CacheKey {
            agent_id: agent_id.to_string(),
            prompt_hash: hasher.finish(),
        }
    }

    /// Cached (content, provider) for this agent and prompt, if still fresh.
    pub fn get(&self, agent_id: &str, prompt: &Prompt) -> Option<(String, String)> {
        let key = Self::key(agent_id, prompt);
        let Ok(mut inner) = self.inner.lock() else {
            return None;
        };
        match inner.entries.get(&key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                Some((entry.content.clone(), entry.provider.clone()))
            }
            Some(_) => {
                inner.entries.remove(&key);
                inner.insertion_order.retain(|k| k != &key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, agent_id: &str, prompt: &Prompt, content: &str, provider: &str) {
        let key = Self::key(agent_id, prompt);
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        while inner.entries.len() >= self.capacity {
            match inner.insertion_order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
        if inner.entries.insert(
            key.clone(),
            CacheEntry {
                content: content.to_string(),
                provider: provider.to_string(),
                inserted_at: Instant::now(),
            },
        ).is_none()
        {
            inner.insertion_order.push_back(key);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.entries.clear();
            inner.insertion_order.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(user: &str) -> Prompt {
        Prompt {
            system: "system".to_string(),
            user: user.to_string(),
        }
    }

    #[test]
    fn test_hit_returns_content_and_provider() {
        let cache = ResponseCache::default();
        cache.insert("a1", &prompt("q"), "answer", "claude");
        assert_eq!(
            cache.get("a1", &prompt("q")),
            Some(("answer".to_string(), "claude".to_string()))
        );
    }

    #[test]
    fn test_key_distinguishes_agent_and_prompt() {
        let cache = ResponseCache::default();
        cache.insert("a1", &prompt("q"), "answer", "claude");
        assert!(cache.get("a2", &prompt("q")).is_none());
        assert!(cache.get("a1", &prompt("other")).is_none());
    }

    #[test]
    fn test_expired_entry_misses() {
        let cache = ResponseCache::new(Duration::from_millis(0), 4);
        cache.insert("a1", &prompt("q"), "answer", "claude");
        assert!(cache.get("a1", &prompt("q")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_fifo_evicts_oldest_not_least_recent() {
        let cache = ResponseCache::new(CACHE_TTL, 2);
        cache.insert("a1", &prompt("q"), "one", "claude");
        cache.insert("a2", &prompt("q"), "two", "claude");
        // Touch the oldest entry; FIFO must still evict it first
        assert!(cache.get("a1", &prompt("q")).is_some());
        cache.insert("a3", &prompt("q"), "three", "claude");
        assert!(cache.get("a1", &prompt("q")).is_none());
        assert!(cache.get("a2", &prompt("q")).is_some());
        assert!(cache.get("a3", &prompt("q")).is_some());
    }
}
