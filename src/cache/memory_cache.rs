use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::cache::store::TokenStore;
use crate::cache::token::CachedToken;

#[derive(Debug, Clone)]
struct Entry {
    value: CachedToken,
    expires_at: Instant,
}

/// Process-local token cache: key -> (token, ttl deadline).
///
/// Clones share the same map, so two providers built from clones of one
/// `MemoryCache` see each other's tokens.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl TokenStore for MemoryCache {
    /// Get token if it exists and its ttl has not run out
    async fn get(&self, key: &str) -> Result<Option<CachedToken>> {
        let found = {
            let map = self.inner.read().await;
            map.get(key).cloned()
        };

        match found {
            Some(entry) if Instant::now() < entry.expires_at => Ok(Some(entry.value)),
            Some(_) => {
                self.inner.write().await.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &CachedToken, ttl: Duration) -> Result<()> {
        let entry = Entry { value: value.clone(), expires_at: Instant::now() + ttl };
        self.inner.write().await.insert(key.to_string(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::MemoryCache;
    use crate::cache::store::TokenStore;
    use crate::cache::token::Token;

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = MemoryCache::new();
        let token = Token::new("short-val".into(), "bearer".into(), 3600, "read".into());

        cache.put("key", &token, Duration::from_secs(4)).await.unwrap();
        assert_eq!(cache.get("key").await.unwrap(), Some(token));

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(cache.get("key").await.unwrap(), None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let cache = MemoryCache::new();
        let other = cache.clone();
        let token = Token::new("shared".into(), "bearer".into(), 60, "".into());

        cache.put("key", &token, Duration::from_secs(60)).await.unwrap();
        assert_eq!(other.get("key").await.unwrap().map(|t| t.access_token), Some("shared".to_owned()));
    }
}
