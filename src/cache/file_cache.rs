use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::cache::store::TokenStore;
use crate::cache::token::CachedToken;
use crate::helpers::time::now_i64;

/// On-disk layout of one cache entry.
#[derive(Debug, Serialize, Deserialize)]
struct FileEntry {
    expires_at: i64, // UNIX TIMESTAMP
    value: CachedToken,
}

/// Token cache backed by one JSON file per key inside `dir`.
///
/// Survives process restarts. Writes go through a temporary file and a
/// rename so readers never observe a half-written entry.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl TokenStore for FileCache {
    async fn get(&self, key: &str) -> Result<Option<CachedToken>> {
        let path = self.entry_path(key);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("reading cache entry {}", path.display())),
        };

        let entry: FileEntry = serde_json::from_str(&raw)
            .with_context(|| format!("cache entry {} is corrupted", path.display()))?;

        if now_i64() >= entry.expires_at {
            debug!("cache entry {} expired, removing", path.display());
            let _ = fs::remove_file(&path).await;
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    async fn put(&self, key: &str, value: &CachedToken, ttl: Duration) -> Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o700);
        builder
            .create(&self.dir)
            .await
            .with_context(|| format!("creating cache dir {}", self.dir.display()))?;

        let path = self.entry_path(key);
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let entry = FileEntry {
            expires_at: now_i64().saturating_add(ttl_secs),
            value: value.clone(),
        };
        let content = serde_json::to_vec(&entry)?;

        // 0600 from creation, never widened
        let tmp = path.with_extension("tmp");
        let _ = fs::remove_file(&tmp).await;
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options
            .open(&tmp)
            .await
            .with_context(|| format!("opening {}", tmp.display()))?;
        file.write_all(&content).await.with_context(|| format!("writing {}", tmp.display()))?;
        file.flush().await?;
        drop(file);

        fs::rename(&tmp, &path).await.with_context(|| format!("renaming into {}", path.display()))?;

        info!("token cached at '{}', ttl {} seconds", path.display(), ttl.as_secs());
        Ok(())
    }
}
