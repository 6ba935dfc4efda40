//! Stored session between invocations
//!
//! Keeps the session cookie in a small JSON file, by default
//! ~/.board-session.json. A stored token is only reused against the
//! service it was issued by. On unix the file is readable by its owner only.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_FILE_NAME: &str = ".board-session.json";

/// Contents of the session file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Service the token was issued by
    pub base_url: String,
    /// Value of the `access_token` cookie
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The given path, or the default in the home directory.
    pub fn resolve(path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_default()
                .join(DEFAULT_FILE_NAME)
        });
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored token for `base_url`, if any.
    ///
    /// Unreadable or malformed files are treated as absent.
    pub fn token_for(&self, base_url: &str) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let stored: StoredSession = match serde_json::from_str(&content) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring malformed session file");
                return None;
            }
        };

        (same_service(&stored.base_url, base_url) && !stored.access_token.is_empty())
            .then_some(stored.access_token)
    }

    pub fn save(&self, base_url: &str, access_token: &str) -> Result<()> {
        let stored = StoredSession {
            base_url: base_url.to_string(),
            access_token: access_token.to_string(),
        };
        let content = serde_json::to_string_pretty(&stored)?;
        write_private(&self.path, content.as_bytes())
            .with_context(|| format!("Failed to write session file {}", self.path.display()))
    }

    /// Remove the file. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove session file {}", self.path.display())),
        }
    }
}

#[cfg(unix)]
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(content)
}

#[cfg(not(unix))]
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, content)
}

fn same_service(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}
