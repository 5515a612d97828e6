//! HTTP server for the browser-based token generator.
//!
//! Serves the HTML page with the client config injected, a health check, a
//! debug dump of the client config, and the rest of the static directory.

use std::{
    io::Write,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::{
    config::{FirebaseClientConfig, ServerConfig},
    error::FirebaseError,
};

pub mod template;

/// File name of the page template inside the static directory.
pub const TEMPLATE_FILE: &str = "test-auth.html";

const CONFIG_NOTE: &str = "This endpoint is for debugging. Remove in production.";
const RULE: &str = "═══════════════════════════════════════════════════";

#[derive(Clone)]
struct AppState {
    firebase: Arc<FirebaseClientConfig>,
    template_path: PathBuf,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    firebase: HealthFirebase,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthFirebase {
    project_id: String,
    auth_domain: String,
}

#[derive(Serialize)]
struct ConfigResponse {
    firebase: FirebaseClientConfig,
    note: &'static str,
}

/// Builds the router. `static_dir` holds the page template and every other
/// file served as-is.
pub fn router(firebase: FirebaseClientConfig, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();

    let state = AppState {
        firebase: Arc::new(firebase),
        template_path: static_dir.join(TEMPLATE_FILE),
    };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/config", get(api_config))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Response {
    match render_page(&state).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Error serving HTML file: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

async fn render_page(state: &AppState) -> Result<String, FirebaseError> {
    let html = tokio::fs::read_to_string(&state.template_path)
        .await
        .with_context(|| format!("Failed to read {}", state.template_path.display()))?;

    template::render(&html, &state.firebase)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        firebase: HealthFirebase {
            project_id: state.firebase.project_id.clone(),
            auth_domain: state.firebase.auth_domain.clone(),
        },
    })
}

async fn api_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        firebase: FirebaseClientConfig::clone(&state.firebase),
        note: CONFIG_NOTE,
    })
}

pub struct Server {
    listener: TcpListener,
    app: Router,
    firebase: FirebaseClientConfig,
}

impl Server {
    /// Binds to `0.0.0.0:<port>`. Port 0 picks a free port.
    pub async fn bind(config: ServerConfig, static_dir: PathBuf) -> Result<Self, FirebaseError> {
        let listener = TcpListener::bind(("0.0.0.0", config.port))
            .await
            .with_context(|| format!("Failed to bind to port {}", config.port))?;

        tracing::debug!(static_dir = %static_dir.display(), "Serving static files");

        Ok(Self {
            listener,
            app: router(config.firebase.clone(), static_dir),
            firebase: config.firebase,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, FirebaseError> {
        let addr = self
            .listener
            .local_addr()
            .context("Failed to read bound address")?;
        Ok(addr)
    }

    pub fn write_banner<W: Write>(&self, out: &mut W) -> Result<(), FirebaseError> {
        let port = self.local_addr()?.port();
        write_banner(out, port, &self.firebase).context("Failed to write startup banner")?;
        Ok(())
    }

    pub async fn run(self) -> Result<(), FirebaseError> {
        axum::serve(self.listener, self.app)
            .await
            .context("HTTP server terminated unexpectedly")?;
        Ok(())
    }
}

fn write_banner<W: Write>(
    out: &mut W,
    port: u16,
    firebase: &FirebaseClientConfig,
) -> std::io::Result<()> {
    let base = format!("http://localhost:{}", port);

    writeln!(out, "🔥 Firebase Token Creator Server")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "🌐 Server running at: {}", base)?;
    writeln!(out, "📦 Firebase Project: {}", firebase.project_id)?;
    writeln!(out, "🏠 Auth Domain: {}", firebase.auth_domain)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "\n📚 Available endpoints:")?;
    writeln!(out, "   • {}/          - Token generator UI", base)?;
    writeln!(out, "   • {}/health    - Health check", base)?;
    writeln!(out, "   • {}/api/config - Firebase config (debug)", base)?;
    writeln!(out, "\n💡 Open the first URL in your browser to generate tokens")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_lists_all_endpoints() {
        let firebase = FirebaseClientConfig {
            api_key: "key".to_string(),
            auth_domain: "demo.firebaseapp.com".to_string(),
            project_id: "demo".to_string(),
            storage_bucket: "demo.appspot.com".to_string(),
            messaging_sender_id: "1".to_string(),
            app_id: "app".to_string(),
        };

        let mut out = Vec::new();
        write_banner(&mut out, 4321, &firebase).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("📦 Firebase Project: demo"));
        assert!(out.contains("🏠 Auth Domain: demo.firebaseapp.com"));
        for path in ["/ ", "/health ", "/api/config "] {
            assert!(
                out.contains(&format!("http://localhost:4321{}", path)),
                "missing {path}"
            );
        }
    }

    #[tokio::test]
    async fn binds_to_an_ephemeral_port() {
        let config = ServerConfig {
            port: 0,
            firebase: FirebaseClientConfig {
                api_key: "key".to_string(),
                auth_domain: "demo.firebaseapp.com".to_string(),
                project_id: "demo".to_string(),
                storage_bucket: "demo.appspot.com".to_string(),
                messaging_sender_id: "1".to_string(),
                app_id: "app".to_string(),
            },
        };

        let server = Server::bind(config, PathBuf::from("static")).await.unwrap();

        assert_ne!(server.local_addr().unwrap().port(), 0);
    }
}
