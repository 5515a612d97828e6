use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

/// Milliseconds since the Unix epoch.
pub fn get_unix_time_millis() -> Result<u128, anyhow::Error> {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("Failed to get system time")?;
    Ok(duration.as_millis())
}

/// Resolves on Ctrl-C. If the handler cannot be installed the error is
/// logged and the future never resolves, so the caller simply runs to
/// completion.
pub async fn interrupt_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for interrupt signal: {}", e);
        std::future::pending::<()>().await;
    }
}
