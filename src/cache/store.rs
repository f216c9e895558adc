use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::cache::file_cache::FileCache;
use crate::cache::memory_cache::MemoryCache;
use crate::cache::token::CachedToken;
use crate::config::settings::CacheConfig;
use crate::utils::constants::{CACHE_DRIVER_FILE, CACHE_DRIVER_MEMORY, DEFAULT_FILE_CACHE_DIR};

/// Key-value backend the provider persists tokens into.
///
/// Entries expire passively: `get` must not return a value older than the
/// `ttl` it was stored with.
pub trait TokenStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<CachedToken>>> + Send;

    fn put(
        &self,
        key: &str,
        value: &CachedToken,
        ttl: Duration,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Backend selected by driver name.
#[derive(Debug, Clone)]
pub enum CacheDriver {
    File(FileCache),
    Memory(MemoryCache),
}

impl CacheDriver {
    pub fn from_config(cfg: &CacheConfig) -> Result<Self> {
        match cfg.driver.as_str() {
            CACHE_DRIVER_FILE => {
                let dir = cfg
                    .path
                    .as_ref()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_FILE_CACHE_DIR));
                Ok(CacheDriver::File(FileCache::new(dir)))
            }
            CACHE_DRIVER_MEMORY => Ok(CacheDriver::Memory(MemoryCache::new())),
            t => bail!("Unsupported cache driver '{}'", t),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CacheDriver::File(_) => CACHE_DRIVER_FILE,
            CacheDriver::Memory(_) => CACHE_DRIVER_MEMORY,
        }
    }
}

impl TokenStore for CacheDriver {
    async fn get(&self, key: &str) -> Result<Option<CachedToken>> {
        match self {
            CacheDriver::File(c) => c.get(key).await,
            CacheDriver::Memory(c) => c.get(key).await,
        }
    }

    async fn put(&self, key: &str, value: &CachedToken, ttl: Duration) -> Result<()> {
        match self {
            CacheDriver::File(c) => c.put(key, value, ttl).await,
            CacheDriver::Memory(c) => c.put(key, value, ttl).await,
        }
    }
}
