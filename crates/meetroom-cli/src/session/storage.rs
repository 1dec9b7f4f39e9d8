//! Credential storage for persisting login state.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use meetroom_file::FileCredentialStore;

/// Get the credential file path.
pub fn credentials_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "meetroom").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("credentials.json"))
}

/// Open the credential store under the platform data directory.
pub fn open_store() -> Result<Arc<FileCredentialStore>> {
    let path = credentials_path()?;
    let store = FileCredentialStore::open(&path)
        .with_context(|| format!("Failed to open credential file {}", path.display()))?;
    Ok(Arc::new(store))
}
