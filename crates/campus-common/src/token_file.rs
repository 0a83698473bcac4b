use campus_http::{ApiError, Result, TokenStore};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Token store backed by a single file; the file's absence means "logged out".
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under the campus home directory.
    pub fn at_default_location() -> Self {
        Self::new(crate::token_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    debug!("Failed to read token at {:?}: {}", self.path, e);
                }
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        crate::ensure_parent(&self.path).map_err(|e| ApiError::Storage(e.to_string()))?;
        fs::write(&self.path, token).map_err(|e| ApiError::Storage(e.to_string()))
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Storage(e.to_string())),
        }
    }
}
