use anyhow::Context;
use jsonwebtoken::{get_current_timestamp, Algorithm, EncodingKey};
use serde::Serialize;

use crate::{error::FirebaseError, ServiceAccount};

const FIREBASE_AUDIENCE: &str =
    "https://identitytoolkit.googleapis.com/google.identity.identitytoolkit.v1.IdentityToolkit";

/// Custom tokens are valid for one hour, the maximum Firebase accepts.
const CUSTOM_TOKEN_LIFETIME_SECS: u64 = 60 * 60;

const MAX_UID_LENGTH: usize = 128;

/// Claim names that Firebase reserves for itself and rejects as developer
/// claims.
const RESERVED_CLAIMS: &[&str] = &[
    "acr",
    "amr",
    "at_hash",
    "aud",
    "auth_time",
    "azp",
    "cnf",
    "c_hash",
    "exp",
    "iat",
    "iss",
    "jti",
    "nbf",
    "nonce",
    "firebase",
];

/// Admin context bound to a single project. Holds the parsed signing key so
/// that an unusable private key is caught when the context is built, not on
/// the first mint.
pub struct FirebaseAdmin {
    project_id: String,
    client_email: String,
    private_key_id: String,
    encoding_key: EncodingKey,
}

impl FirebaseAdmin {
    pub fn new(
        service_account: ServiceAccount,
        project_id: impl Into<String>,
    ) -> Result<Self, FirebaseError> {
        let project_id = project_id.into();

        if service_account.project_id != project_id {
            tracing::warn!(
                configured = %project_id,
                service_account = %service_account.project_id,
                "Configured project ID differs from the service account's project"
            );
        }

        let encoding_key = EncodingKey::from_rsa_pem(service_account.private_key.as_bytes())
            .context("Failed to create JWT encoding key from the given private key")?;

        Ok(Self {
            project_id,
            client_email: service_account.client_email,
            private_key_id: service_account.private_key_id,
            encoding_key,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Creates and signs a custom token for a user ID, which the user can use
    /// to authenticate against Firebase services. `claims` must serialize to a
    /// JSON object and ends up in the ID token issued for this user.
    ///
    /// See the official [Firebase Auth docs for creating custom tokens](https://firebase.google.com/docs/auth/admin/create-custom-tokens#create_custom_tokens_using_a_third-party_jwt_library).
    pub fn create_custom_token(
        &self,
        uid: &str,
        claims: &impl Serialize,
    ) -> Result<String, FirebaseError> {
        #[derive(Serialize)]
        struct CustomTokenClaims<'a> {
            aud: &'a str,
            iat: u64,
            exp: u64,
            iss: &'a str,
            sub: &'a str,
            uid: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            claims: Option<serde_json::Map<String, serde_json::Value>>,
        }

        if uid.is_empty() || uid.chars().count() > MAX_UID_LENGTH {
            return Err(FirebaseError::InvalidCustomToken(format!(
                "uid must be a non-empty string with at most {} characters",
                MAX_UID_LENGTH
            )));
        }

        let developer_claims = developer_claims(claims)?;

        let mut header = jsonwebtoken::Header::new(Algorithm::RS256);
        header.kid = Some(self.private_key_id.clone());

        let issued_at_time = get_current_timestamp();

        let claims = CustomTokenClaims {
            iss: &self.client_email,
            sub: &self.client_email,
            aud: FIREBASE_AUDIENCE,
            iat: issued_at_time,
            exp: issued_at_time + CUSTOM_TOKEN_LIFETIME_SECS,
            uid,
            claims: developer_claims,
        };

        let jwt = jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .context("Failed to create custom token JWT")?;

        Ok(jwt)
    }
}

fn developer_claims(
    claims: &impl Serialize,
) -> Result<Option<serde_json::Map<String, serde_json::Value>>, FirebaseError> {
    let value = serde_json::to_value(claims).context("Failed to serialize custom claims")?;

    let map = match value {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Object(map) => map,
        other => {
            return Err(FirebaseError::InvalidCustomToken(format!(
                "claims must be a JSON object, got {}",
                other
            )))
        }
    };

    if let Some(reserved) = map.keys().find(|k| RESERVED_CLAIMS.contains(&k.as_str())) {
        return Err(FirebaseError::InvalidCustomToken(format!(
            "'{}' is a reserved claim and cannot be set",
            reserved
        )));
    }

    Ok((!map.is_empty()).then_some(map))
}
