//! The two fixed token flows the CLI runs: a regular test user and an admin
//! test user, each minted and then exchanged for an ID token.

use serde::Serialize;

use crate::{
    auth::{FirebaseAdmin, IdentityToolkitClient},
    utils::get_unix_time_millis,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFlow {
    Regular,
    Admin,
}

/// Developer claims embedded in the custom token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestClaims {
    pub admin: bool,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct TokenRequest {
    pub user_id: String,
    pub claims: TestClaims,
}

#[derive(Debug, Clone)]
pub struct IdTokenResult {
    pub id_token: String,
    pub user_id: String,
    pub claims: TestClaims,
}

impl TokenFlow {
    fn uid_prefix(self) -> &'static str {
        match self {
            TokenFlow::Regular => "test-user-",
            TokenFlow::Admin => "admin-user-",
        }
    }

    pub fn claims(self) -> TestClaims {
        match self {
            TokenFlow::Regular => TestClaims {
                admin: false,
                email: "test@example.com".to_string(),
                name: "Test User".to_string(),
            },
            TokenFlow::Admin => TestClaims {
                admin: true,
                email: "admin@example.com".to_string(),
                name: "Admin User".to_string(),
            },
        }
    }

    pub fn request_at(self, epoch_millis: u128) -> TokenRequest {
        TokenRequest {
            user_id: format!("{}{}", self.uid_prefix(), epoch_millis),
            claims: self.claims(),
        }
    }

    /// Builds the request for this flow, stamped with the current time.
    /// Falls back to 0 if the system clock is before the Unix epoch.
    pub fn request(self) -> TokenRequest {
        let millis = get_unix_time_millis().unwrap_or_else(|e| {
            tracing::warn!("{:#}", e);
            0
        });
        self.request_at(millis)
    }
}

/// Mints a custom token for `request`. Failures are logged and yield `None`.
pub fn mint(admin: &FirebaseAdmin, request: &TokenRequest) -> Option<String> {
    match admin.create_custom_token(&request.user_id, &request.claims) {
        Ok(token) => Some(token),
        Err(e) => {
            tracing::error!(user_id = %request.user_id, "Error creating custom token: {}", e);
            None
        }
    }
}

/// Mints and exchanges a token for `flow`. Returns `None` if either step
/// fails; the cause has already been logged.
#[tracing::instrument(name = "Token flow", skip(admin, client))]
pub async fn run_flow(
    admin: &FirebaseAdmin,
    client: &IdentityToolkitClient,
    flow: TokenFlow,
) -> Option<IdTokenResult> {
    let request = flow.request();

    let custom_token = mint(admin, &request)?;
    let id_token = client.exchange(&custom_token).await?;

    Some(IdTokenResult {
        id_token,
        user_id: request.user_id,
        claims: request.claims,
    })
}
