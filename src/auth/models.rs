use serde::Deserialize;

/// Successful response of `accounts:signInWithCustomToken`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the ID token in seconds, as a decimal string.
    #[serde(default)]
    pub expires_in: Option<String>,
    #[serde(default)]
    pub is_new_user: Option<bool>,
}
