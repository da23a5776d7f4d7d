//! File-based caching of completer responses, keyed by a hash of the
//! prompt text. Saves a round trip to the backend when the same prompt
//! recurs, which happens often during refinement passes on short lines.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::completer::TextCompleter;
use crate::error::CompleterError;

/// Get the cache directory.
///
/// Uses `PARODY_CACHE_DIR` env var if set, otherwise `~/.cache/parody`.
pub fn cache_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PARODY_CACHE_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".cache").join("parody")
}

/// Compute a stable SHA-256 hash of a prompt string, hex-encoded.
pub fn prompt_hash(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Atomically write data to a file via temp file + rename.
fn atomic_write(target: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = target.with_extension("tmp");
    std::fs::write(&tmp_path, data)?;
    std::fs::rename(&tmp_path, target)?;
    Ok(())
}

fn response_path(dir: &Path, model: &str, hash: &str) -> PathBuf {
    dir.join("completions").join(format!("{}_{}.txt", model, hash))
}

/// Return a cached response for `prompt` under `model`, or `None`.
pub fn get_cached_response(dir: &Path, model: &str, prompt: &str) -> Option<String> {
    let hash = prompt_hash(prompt);
    let path = response_path(dir, model, &hash);
    let text = std::fs::read_to_string(&path).ok()?;
    log::info!("Cache hit: completion ({}...)", &hash[..12.min(hash.len())]);
    Some(text)
}

/// Store a response for `prompt` under `model`.
pub fn store_response(dir: &Path, model: &str, prompt: &str, response: &str) -> Result<()> {
    let hash = prompt_hash(prompt);
    let path = response_path(dir, model, &hash);
    atomic_write(&path, response.as_bytes())
        .with_context(|| format!("Failed to cache completion at {}", path.display()))?;
    log::info!("Cached completion ({}...)", &hash[..12.min(hash.len())]);
    Ok(())
}

/// Wraps a [`TextCompleter`] with an on-disk response cache.
///
/// `verify` is always delegated (caching a connectivity check would hide a
/// backend outage); only `complete` is memoized.
pub struct CachingCompleter<C: TextCompleter> {
    inner: C,
    model: String,
    dir: PathBuf,
}

impl<C: TextCompleter> CachingCompleter<C> {
    pub fn new(inner: C, model: impl Into<String>) -> Self {
        Self {
            inner,
            model: model.into(),
            dir: cache_dir(),
        }
    }

    pub fn with_dir(inner: C, model: impl Into<String>, dir: PathBuf) -> Self {
        Self {
            inner,
            model: model.into(),
            dir,
        }
    }
}

impl<C: TextCompleter> TextCompleter for CachingCompleter<C> {
    fn verify(&self) -> Result<(), CompleterError> {
        self.inner.verify()
    }

    fn complete(&self, prompt: &str) -> Result<String, CompleterError> {
        if let Some(cached) = get_cached_response(&self.dir, &self.model, prompt) {
            return Ok(cached);
        }
        let response = self.inner.complete(prompt)?;
        if let Err(e) = store_response(&self.dir, &self.model, prompt, &response) {
            log::warn!("Failed to persist completion cache entry: {e:#}");
        }
        Ok(response)
    }
}
