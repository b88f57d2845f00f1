// # File State Store
//
// File-based implementation of StateStore.
//
// ## File Format
//
// Plain text, exactly the last IP pushed to the provider, no newline:
//
// ```text
// 203.0.113.7
// ```
//
// ## Writes
//
// - Atomic writes: Uses write-then-rename so a crash never leaves a
//   half-written value behind
// - Parent directories are created on first write

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::Error;
use crate::traits::state_store::StateStore;

/// File name used for the last-IP file when none is given
pub const DEFAULT_FILE_NAME: &str = ".lastip";

/// File-based state store
///
/// # Example
///
/// ```rust,no_run
/// use ddns_core::state::FileStateStore;
/// use ddns_core::traits::StateStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileStateStore::new("/tmp/.lastip");
///
///     store.save("1.2.3.4").await?;
///     assert_eq!(store.load().await?, Some("1.2.3.4".to_string()));
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Create a store backed by `path`; nothing is touched until used
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store in the system temp directory under [`DEFAULT_FILE_NAME`]
    pub fn in_temp_dir() -> Self {
        Self::new(Self::default_path())
    }

    /// Default last-IP file location
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(DEFAULT_FILE_NAME)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get path to temporary file for atomic writes
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self) -> Result<Option<String>, Error> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let ip = content.trim().to_string();
                tracing::debug!("Loaded last IP {:?} from {}", ip, self.path.display());
                Ok(Some(ip))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Last IP file does not exist: {}", self.path.display());
                Ok(None)
            }
            Err(e) => Err(Error::storage(format!(
                "Failed to read last IP file {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn save(&self, ip: &str) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    Error::storage(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        // Write to temporary file first
        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::storage(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(ip.as_bytes()).await.map_err(|e| {
                Error::storage(format!(
                    "Failed to write to temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                Error::storage(format!(
                    "Failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        // Atomic rename (temp -> actual)
        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::storage(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!("Last IP written to file: {}", self.path.display());
        Ok(())
    }
}
