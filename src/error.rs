use std::{io::Write, path::PathBuf};

#[derive(thiserror::Error)]
pub enum FirebaseError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),

    #[error("Invalid value for {name}: {reason}")]
    InvalidConfig { name: String, reason: String },

    #[error("Firebase credentials file not found: {}", .0.display())]
    CredentialsNotFound(PathBuf),

    #[error("Failed to initialize Firebase Admin SDK")]
    CredentialInit(#[source] Box<FirebaseError>),

    #[error("Invalid custom token request: {0}")]
    InvalidCustomToken(String),

    #[error("Identity Toolkit rejected the request (status {status}): {message}")]
    SignInRejected { status: u16, message: String },

    #[error("template: {0}")]
    Template(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FirebaseError {
    /// Writes a startup failure the way the binaries show it to a developer,
    /// with a hint on how to fix it where one exists.
    pub fn write_startup_report<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        match self {
            FirebaseError::MissingEnvVars(missing) => {
                writeln!(out, "❌ Missing required environment variables:")?;
                for name in missing {
                    writeln!(out, "   - {}", name)?;
                }
                writeln!(
                    out,
                    "\n💡 Please copy .env.example to .env and fill in your Firebase configuration"
                )
            }
            FirebaseError::CredentialsNotFound(path) => {
                writeln!(out, "❌ Firebase credentials file not found: {}", path.display())?;
                writeln!(
                    out,
                    "💡 Please ensure your firebase-credentials.json file is in the correct location"
                )?;
                writeln!(
                    out,
                    "💡 Relative paths are resolved against {} unless TOKENCREATOR_HOME is set",
                    env!("CARGO_MANIFEST_DIR")
                )
            }
            FirebaseError::CredentialInit(_) => writeln!(out, "❌ {}", self.chain_message()),
            other => writeln!(out, "❌ Failed to start: {}", other.chain_message()),
        }
    }

    /// The error and all of its causes on one line, separated by `: `.
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            current = cause.source();
        }
        message
    }
}

impl std::fmt::Debug for FirebaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

// Taken from https://www.lpalmieri.com/posts/error-handling-rust/#internal-errors
fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
