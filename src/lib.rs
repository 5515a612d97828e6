//! # Firebase Token Creator
//!
//! Developer tooling for getting hold of Firebase Auth ID tokens during
//! manual testing:
//!
//! - **`get-firebase-token`** mints custom tokens with a service account,
//!   exchanges them for ID tokens through the Identity Toolkit REST API, and
//!   prints them together with an example `curl` invocation. See [`runner`].
//! - **`token-server`** serves a small web page that lets you sign in from a
//!   browser with the project's public client config. See [`server`].
//!
//! Both binaries validate their environment up front via [`config`] and exit
//! with status 1 if anything required is missing.

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod logging;
pub mod runner;
pub mod server;
mod service_account;
pub mod utils;

pub use service_account::{resolve_credentials_path, ServiceAccount};
