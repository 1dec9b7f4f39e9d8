//! JSON-file credential store.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use meetroom_core::error::StoreError;
use meetroom_core::{AccessToken, CredentialStore, Error, RefreshToken, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// On-disk layout of the credential file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCredentials {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
struct Cached {
    access_token: Option<AccessToken>,
    refresh_token: Option<RefreshToken>,
}

impl From<StoredCredentials> for Cached {
    fn from(stored: StoredCredentials) -> Self {
        Self {
            access_token: Some(AccessToken::new(stored.access_token)),
            refresh_token: stored.refresh_token.map(RefreshToken::new),
        }
    }
}

/// Credential store persisted as a JSON file.
///
/// Reads are served from memory; every write goes to disk first, under an
/// advisory lock on a sibling `.lock` file, and is then mirrored into the
/// cache. On Unix the file is created with mode `0600`.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    cache: RwLock<Cached>,
}

impl FileCredentialStore {
    /// Open the store at `path`, loading any credentials already saved there.
    ///
    /// A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read and
    /// [`StoreError::Corrupt`] if it does not hold valid credentials.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let cached = load(&path)?;
        debug!(has_session = cached.access_token.is_some(), "Opened credential store");

        Ok(Self {
            path,
            cache: RwLock::new(cached),
        })
    }

    /// Path of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the stored credentials were last written, if any are stored.
    pub fn saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(read_file(&self.path)?.map(|stored| stored.saved_at))
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| io_error(&lock_path, e))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| io_error(&lock_path, e))?;

        let result = f();

        if let Err(e) = FileExt::unlock(&lock_file) {
            warn!(error = %e, "Failed to release credential file lock");
        }
        result
    }

    fn write(&self, access: &AccessToken, refresh: Option<&RefreshToken>) -> Result<()> {
        let stored = StoredCredentials {
            access_token: access.as_str().to_string(),
            refresh_token: refresh.map(|t| t.as_str().to_string()),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|e| {
            Error::from(StoreError::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        self.with_lock(|| {
            let tmp = self.path.with_extension("json.tmp");
            write_private(&tmp, json.as_bytes())?;
            fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))
        })
    }

    fn cache(&self) -> std::sync::RwLockReadGuard<'_, Cached> {
        self.cache.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for FileCredentialStore {
    fn access_token(&self) -> Option<AccessToken> {
        self.cache().access_token.clone()
    }

    fn refresh_token(&self) -> Option<RefreshToken> {
        self.cache().refresh_token.clone()
    }

    fn set_access_token(&self, token: AccessToken) -> Result<()> {
        let refresh = self.refresh_token();
        self.save(token, refresh)
    }

    fn save(&self, access: AccessToken, refresh: Option<RefreshToken>) -> Result<()> {
        self.write(&access, refresh.as_ref())?;
        *self.cache.write().unwrap_or_else(|e| e.into_inner()) = Cached {
            access_token: Some(access),
            refresh_token: refresh,
        };
        debug!("Credentials saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.with_lock(|| match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&self.path, e)),
        })?;
        *self.cache.write().unwrap_or_else(|e| e.into_inner()) = Cached::default();
        debug!("Credentials cleared");
        Ok(())
    }
}

fn io_error(path: &Path, source: io::Error) -> Error {
    Error::from(StoreError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn read_file(path: &Path) -> Result<Option<StoredCredentials>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };

    let stored = serde_json::from_str(&json).map_err(|e| StoreError::Corrupt {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(Some(stored))
}

fn load(path: &Path) -> Result<Cached> {
    Ok(read_file(path)?.map(Cached::from).unwrap_or_default())
}

fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.create(true).write(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(|e| io_error(path, e))?;
    file.write_all(contents).map_err(|e| io_error(path, e))?;
    file.sync_data().map_err(|e| io_error(path, e))?;

    // Tighten files that already existed with a wider mode
    #[cfg(unix)]
    {
        let mut perms = file.metadata().map_err(|e| io_error(path, e))?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms).map_err(|e| io_error(path, e))?;
    }

    Ok(())
}
