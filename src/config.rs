//! Environment-driven configuration shared by both binaries.
//!
//! Each entry point declares the variables it cannot run without and hands
//! the list to [`require_vars`], which reports every missing name at once
//! rather than failing on the first.

use std::{collections::HashMap, env, path::PathBuf};

use serde::Serialize;

use crate::error::FirebaseError;

/// Variables the token generator CLI cannot run without.
pub const CLI_REQUIRED_VARS: &[&str] = &[
    "FIREBASE_PROJECT_ID",
    "FIREBASE_API_KEY",
    "FIREBASE_CREDENTIALS_FILE",
];

/// Variables the token server cannot run without.
pub const SERVER_REQUIRED_VARS: &[&str] = &[
    "FIREBASE_API_KEY",
    "FIREBASE_AUTH_DOMAIN",
    "FIREBASE_PROJECT_ID",
    "FIREBASE_STORAGE_BUCKET",
    "FIREBASE_MESSAGING_SENDER_ID",
    "FIREBASE_APP_ID",
];

pub const DEFAULT_PORT: u16 = 3000;

/// Overrides the directory that relative paths are resolved against.
const HOME_VAR: &str = "TOKENCREATOR_HOME";

/// Validated, read-only view over the required variables.
#[derive(Debug, Clone)]
pub struct EnvVars {
    values: HashMap<String, String>,
}

impl EnvVars {
    /// Returns a required value. Names outside the validated list yield an
    /// empty string.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or_default()
    }
}

/// Checks every name in `names` against `lookup`. Absent and empty values
/// both count as missing. All missing names are reported, in list order.
pub fn require_vars<F>(names: &[&str], lookup: F) -> Result<EnvVars, FirebaseError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut values = HashMap::with_capacity(names.len());
    let mut missing = Vec::new();

    for &name in names {
        match lookup(name).filter(|v| !v.is_empty()) {
            Some(value) => {
                values.insert(name.to_string(), value);
            }
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(FirebaseError::MissingEnvVars(missing));
    }

    Ok(EnvVars { values })
}

/// Loads a `.env` file from the working directory when one exists.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }
}

/// The directory the binaries treat as their own: relative credential paths
/// and the static page are resolved against it.
pub fn program_dir() -> PathBuf {
    env::var_os(HOME_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")))
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub project_id: String,
    pub api_key: String,
    pub credentials_file: String,
    pub auth_emulator_host: Option<String>,
}

impl CliConfig {
    pub fn from_env() -> Result<Self, FirebaseError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, FirebaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = require_vars(CLI_REQUIRED_VARS, &lookup)?;

        Ok(Self {
            project_id: vars.get("FIREBASE_PROJECT_ID").to_string(),
            api_key: vars.get("FIREBASE_API_KEY").to_string(),
            credentials_file: vars.get("FIREBASE_CREDENTIALS_FILE").to_string(),
            auth_emulator_host: lookup("FIREBASE_AUTH_EMULATOR_HOST").filter(|v| !v.is_empty()),
        })
    }
}

/// The public parameters a browser-side Firebase client needs. None of these
/// are secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseClientConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl FirebaseClientConfig {
    fn from_vars(vars: &EnvVars) -> Self {
        Self {
            api_key: vars.get("FIREBASE_API_KEY").to_string(),
            auth_domain: vars.get("FIREBASE_AUTH_DOMAIN").to_string(),
            project_id: vars.get("FIREBASE_PROJECT_ID").to_string(),
            storage_bucket: vars.get("FIREBASE_STORAGE_BUCKET").to_string(),
            messaging_sender_id: vars.get("FIREBASE_MESSAGING_SENDER_ID").to_string(),
            app_id: vars.get("FIREBASE_APP_ID").to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub firebase: FirebaseClientConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, FirebaseError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, FirebaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = require_vars(SERVER_REQUIRED_VARS, &lookup)?;

        let port = match lookup("PORT").filter(|v| !v.is_empty()) {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| FirebaseError::InvalidConfig {
                name: "PORT".to_string(),
                reason: format!("'{}' is not a valid port number", raw),
            })?,
        };

        Ok(Self {
            port,
            firebase: FirebaseClientConfig::from_vars(&vars),
        })
    }
}
