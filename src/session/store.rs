use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::TaskdeskError;
use crate::session::identity;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Clone)]
enum Backing {
    File(PathBuf),
    Memory(Arc<Mutex<Option<String>>>),
}

/// Holder of the bearer token, injected into the API client.
///
/// The file backing is re-read on every [`Session::token`] call, so a token
/// rotated by another process is picked up by the very next request.
#[derive(Debug, Clone)]
pub struct Session {
    backing: Backing,
}

impl Session {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backing: Backing::File(path.into()),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backing: Backing::Memory(Arc::new(Mutex::new(None))),
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            backing: Backing::Memory(Arc::new(Mutex::new(Some(token.into())))),
        }
    }

    pub fn location(&self) -> Option<&Path> {
        match &self.backing {
            Backing::File(path) => Some(path),
            Backing::Memory(_) => None,
        }
    }

    /// Current token; an empty or unreadable store counts as no token.
    pub fn token(&self) -> Option<String> {
        let token = match &self.backing {
            Backing::Memory(slot) => slot.lock().clone(),
            Backing::File(path) => read_file(path),
        };
        token.filter(|t| !t.trim().is_empty())
    }

    pub fn set_token(&self, token: &str) -> Result<(), TaskdeskError> {
        match &self.backing {
            Backing::Memory(slot) => {
                *slot.lock() = Some(token.to_owned());
                Ok(())
            }
            Backing::File(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let file = SessionFile {
                    token: Some(token.to_owned()),
                };
                let content = serde_json::to_string_pretty(&file)
                    .map_err(|e| TaskdeskError::session(e.to_string()))?;
                write_private(path, content.as_bytes())?;
                Ok(())
            }
        }
    }

    pub fn clear_token(&self) -> Result<(), TaskdeskError> {
        match &self.backing {
            Backing::Memory(slot) => {
                *slot.lock() = None;
                Ok(())
            }
            Backing::File(path) => match fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Advisory username decoded from the current token.
    pub fn current_username(&self) -> Option<String> {
        self.token()
            .as_deref()
            .and_then(identity::username_from_token)
    }
}

/// Owner-only on Unix, including when the file already existed.
#[cfg(unix)]
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(content)
}

#[cfg(not(unix))]
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    fs::write(path, content)
}

fn read_file(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<SessionFile>(&content) {
        Ok(file) => file.token,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable session file");
            None
        }
    }
}
