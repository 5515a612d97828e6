//! Sequences the CLI: regular flow, then admin flow, then a short usage
//! report. Output goes to any [`Write`] so the report can be captured.

use std::{future::Future, io::Write, path::Path};

use crate::{
    auth::{FirebaseAdmin, IdentityToolkitClient, IdentityToolkitOptions},
    config::CliConfig,
    error::FirebaseError,
    flows::{run_flow, IdTokenResult, TokenFlow},
    resolve_credentials_path, ServiceAccount,
};

const RULE: &str = "══════════════════════════════════════════════════════════════";
const TOKEN_PREVIEW_CHARS: usize = 50;

pub struct Runner {
    admin: FirebaseAdmin,
    client: IdentityToolkitClient,
    credentials_file: String,
}

/// Tokens produced by one complete run. A `None` means that flow failed.
#[derive(Debug)]
pub struct Report {
    pub regular: Option<IdTokenResult>,
    pub admin: Option<IdTokenResult>,
}

#[derive(Debug)]
pub enum Outcome {
    Completed(Report),
    Interrupted,
}

impl Runner {
    pub fn new(
        admin: FirebaseAdmin,
        client: IdentityToolkitClient,
        credentials_file: impl Into<String>,
    ) -> Self {
        Self {
            admin,
            client,
            credentials_file: credentials_file.into(),
        }
    }

    /// Loads the service account named by `config`, resolved against
    /// `base_dir`, and builds the admin context and Identity Toolkit client.
    /// Any failure here is a configuration problem and is not retried.
    pub fn from_config(config: &CliConfig, base_dir: &Path) -> Result<Self, FirebaseError> {
        let credentials_path = resolve_credentials_path(base_dir, &config.credentials_file);
        let admin = ServiceAccount::from_file(&credentials_path)
            .and_then(|service_account| FirebaseAdmin::new(service_account, &config.project_id))
            .map_err(|e| match e {
                FirebaseError::CredentialsNotFound(_) => e,
                other => FirebaseError::CredentialInit(Box::new(other)),
            })?;

        let options = match &config.auth_emulator_host {
            Some(host) => {
                tracing::info!(%host, "Using the Firebase Auth emulator");
                IdentityToolkitOptions::emulator(host)
            }
            None => IdentityToolkitOptions::default(),
        };
        let client = IdentityToolkitClient::with_options(&config.api_key, options)?;

        Ok(Self::new(admin, client, &config.credentials_file))
    }

    pub async fn run<W: Write>(&self, out: &mut W) -> std::io::Result<Report> {
        writeln!(out, "🔥 Firebase ID Token Generator")?;
        writeln!(out, "{}", RULE)?;
        writeln!(out, "📦 Project ID: {}", self.admin.project_id())?;
        writeln!(out, "🔑 Credentials: {}", self.credentials_file)?;
        writeln!(out, "{}", RULE)?;

        writeln!(out, "\n1️⃣  Creating regular user ID token...")?;
        let regular = run_flow(&self.admin, &self.client, TokenFlow::Regular).await;
        write_result(out, TokenFlow::Regular, regular.as_ref())?;

        writeln!(out, "\n2️⃣  Creating admin user ID token...")?;
        let admin = run_flow(&self.admin, &self.client, TokenFlow::Admin).await;
        write_result(out, TokenFlow::Admin, admin.as_ref())?;

        write_completion(out, regular.as_ref())?;

        Ok(Report { regular, admin })
    }
}

/// Runs `runner` until it completes or `interrupt` resolves, whichever comes
/// first. An interrupted run is abandoned as-is and prints a farewell line
/// instead of the completion banner.
pub async fn run_until_interrupted<W, S>(
    runner: &Runner,
    out: &mut W,
    interrupt: S,
) -> std::io::Result<Outcome>
where
    W: Write,
    S: Future<Output = ()>,
{
    let finished = tokio::select! {
        report = runner.run(&mut *out) => Some(report),
        () = interrupt => None,
    };

    match finished {
        Some(report) => Ok(Outcome::Completed(report?)),
        None => {
            writeln!(out, "\n👋 Shutting down gracefully...")?;
            Ok(Outcome::Interrupted)
        }
    }
}

fn write_result<W: Write>(
    out: &mut W,
    flow: TokenFlow,
    result: Option<&IdTokenResult>,
) -> std::io::Result<()> {
    let Some(result) = result else {
        return match flow {
            TokenFlow::Regular => writeln!(out, "❌ Error creating ID token"),
            TokenFlow::Admin => writeln!(out, "❌ Error creating admin ID token"),
        };
    };

    match flow {
        TokenFlow::Regular => writeln!(out, "\n🔑 ID Token Generated:")?,
        TokenFlow::Admin => writeln!(out, "\n👑 Admin ID Token Generated:")?,
    }
    writeln!(out, "{}", result.id_token)?;
    writeln!(out, "\n📝 User ID: {}", result.user_id)?;

    let claims = serde_json::to_string_pretty(&result.claims).map_err(std::io::Error::other)?;
    writeln!(out, "📋 Claims: {}", claims)
}

fn write_completion<W: Write>(
    out: &mut W,
    regular: Option<&IdTokenResult>,
) -> std::io::Result<()> {
    writeln!(out, "\n✨ ID token generation completed!")?;
    writeln!(out, "\n📚 Next steps:")?;
    writeln!(
        out,
        "   1. Use the ID tokens above to test your authentication endpoints"
    )?;
    writeln!(
        out,
        "   2. Run \"cargo run --bin token-server\" to start the HTML token generator"
    )?;

    if let Some(regular) = regular {
        let preview: String = regular.id_token.chars().take(TOKEN_PREVIEW_CHARS).collect();
        let divider = "─".repeat(80);

        writeln!(out, "\n🔧 Example usage with curl:")?;
        writeln!(out, "{}", divider)?;
        writeln!(out, "curl -X GET \"http://your-api-endpoint\" \\")?;
        writeln!(out, "  -H \"Authorization: Bearer {}...\"", preview)?;
        writeln!(out, "{}", divider)?;
    }

    Ok(())
}
