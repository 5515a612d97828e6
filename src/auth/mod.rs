//! Minting custom tokens and exchanging them for ID tokens.
//!
//! [`FirebaseAdmin`] signs custom tokens locally with the service account's
//! private key. [`IdentityToolkitClient`] trades them for ID tokens via the
//! Identity Toolkit REST API.

use anyhow::Context;
use serde::Serialize;

use crate::error::FirebaseError;

use self::error::AuthApiError;

mod custom_token;
mod error;
pub mod models;
mod options;
#[cfg(test)]
pub(crate) mod test_helpers;

pub use custom_token::FirebaseAdmin;
pub use models::SignInResponse;
pub use options::IdentityToolkitOptions;

pub struct IdentityToolkitClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithCustomTokenBody<'a> {
    token: &'a str,
    return_secure_token: bool,
}

impl IdentityToolkitClient {
    pub fn new(api_key: &str) -> Result<Self, FirebaseError> {
        Self::with_options(api_key, IdentityToolkitOptions::default())
    }

    pub fn with_options(
        api_key: &str,
        options: IdentityToolkitOptions,
    ) -> Result<Self, FirebaseError> {
        let client = reqwest::Client::builder()
            .https_only(options.https_only)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            api_url: format!("{}/v1/accounts", options.host_url.trim_end_matches('/')),
        })
    }

    fn url(&self, path: impl AsRef<str>) -> String {
        format!("{}:{}", self.api_url, path.as_ref())
    }

    /// Signs in with a custom token minted by [`FirebaseAdmin`]. Any non-2xx
    /// status is reported as [`FirebaseError::SignInRejected`].
    pub async fn sign_in_with_custom_token(
        &self,
        custom_token: &str,
    ) -> Result<SignInResponse, FirebaseError> {
        let body = SignInWithCustomTokenBody {
            token: custom_token,
            return_secure_token: true,
        };

        let res = self
            .client
            .post(self.url("signInWithCustomToken"))
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .context("Failed to send sign-in request to Identity Toolkit")?;

        let status = res.status();

        if status.is_success() {
            let signed_in: SignInResponse =
                res.json().await.context("Failed to read response JSON")?;

            Ok(signed_in)
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(AuthApiError::from_response(status, &body))
        }
    }

    /// Exchanges a custom token for an ID token. Failures are logged and
    /// surface as `None`; nothing is retried.
    pub async fn exchange(&self, custom_token: &str) -> Option<String> {
        match self.sign_in_with_custom_token(custom_token).await {
            Ok(signed_in) => Some(signed_in.id_token),
            Err(e) => {
                tracing::error!("Error exchanging custom token for ID token: {}", e);
                None
            }
        }
    }
}
