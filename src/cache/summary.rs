use crate::model::Result;
use crate::report::Envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

const LOG_TARGET: &str = "cache";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    fetched_at: DateTime<Utc>,
    username: String,
    response: Envelope,
}

/// The last successful response for one user, reused until it is older than `ttl`.
#[derive(Debug, Clone)]
pub struct SummaryCache {
    path: PathBuf,
    ttl: Duration,
}

impl SummaryCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached response if it belongs to `username` and is still fresh at `now`.
    /// Unreadable entries count as a miss.
    pub fn load_fresh(&self, username: &str, now: DateTime<Utc>) -> Option<Envelope> {
        let json_str = match fs::read_to_string(&self.path) {
            Ok(json_str) => json_str,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Cannot read cache '{}': {e}", self.path.display());
                return None;
            }
        };
        let entry: CacheEntry = match serde_json::from_str(&json_str) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Ignoring corrupt cache '{}': {e}", self.path.display());
                return None;
            }
        };

        if entry.username != username {
            log::debug!(target: LOG_TARGET, "Cache holds '{}', not '{username}'", entry.username);
            return None;
        }
        let age = now.signed_duration_since(entry.fetched_at);
        let fresh = age
            .to_std()
            .map(|age| age < self.ttl)
            .unwrap_or(false);
        if !fresh {
            log::debug!(target: LOG_TARGET, "Cache for '{username}' expired ({}s old)", age.num_seconds());
            return None;
        }
        log::info!(target: LOG_TARGET, "Using cached statistics for '{username}' ({}s old)", age.num_seconds());
        Some(entry.response)
    }

    pub fn store(&self, username: &str, fetched_at: DateTime<Utc>, response: &Envelope) -> Result<()> {
        let entry = CacheEntry {
            fetched_at,
            username: username.to_string(),
            response: response.clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&entry)?)?;
        log::debug!(target: LOG_TARGET, "Stored statistics for '{username}' in '{}'", self.path.display());
        Ok(())
    }
}
