use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

use crate::error::FirebaseError;

/// Service account information contained within the service account JSON file
/// that you can download from Firebase.
///
/// `Serialize`, `Display`, and `Debug` are intentionally not implemented to
/// avoid accidentally leaking credentials.
#[derive(Deserialize, Clone)]
pub struct ServiceAccount {
    pub project_id: String,
    pub private_key: String,
    pub private_key_id: String,
    pub client_email: String,
    #[serde(default)]
    pub client_id: Option<String>,
}

impl ServiceAccount {
    /// Creates a new `ServiceAccount` instance from a service account JSON
    /// file. You can download such a file from Firebase.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FirebaseError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(FirebaseError::CredentialsNotFound(path.to_path_buf()));
        }

        let file_reader = File::open(path).context("Failed to read service account JSON file")?;
        let service_account = serde_json::from_reader(file_reader)
            .context("Could not extract service account details from file")?;

        Ok(service_account)
    }
}

/// Resolves a configured credentials path against `base`. Absolute paths are
/// returned untouched.
pub fn resolve_credentials_path(base: impl AsRef<Path>, configured: impl AsRef<Path>) -> PathBuf {
    let configured = configured.as_ref();

    if configured.is_absolute() {
        return configured.to_path_buf();
    }

    let joined = base.as_ref().join(configured);
    if joined.is_absolute() {
        return joined;
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(&joined))
        .unwrap_or(joined)
}
