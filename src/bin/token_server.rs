use std::process::ExitCode;

use firebase_tokencreator::{
    config::{self, ServerConfig},
    logging,
    server::Server,
    utils::interrupt_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    config::load_dotenv();
    logging::init("info,tower_http=info");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = e.write_startup_report(&mut std::io::stderr());
            return ExitCode::FAILURE;
        }
    };

    let static_dir = config::program_dir().join("static");

    let server = match Server::bind(config, static_dir).await {
        Ok(server) => server,
        Err(e) => {
            let _ = e.write_startup_report(&mut std::io::stderr());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.write_banner(&mut std::io::stdout()) {
        tracing::warn!("{}", e);
    }

    tokio::select! {
        result = server.run() => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("{:?}", e);
                ExitCode::FAILURE
            }
        },
        () = interrupt_signal() => {
            println!("\n👋 Shutting down server...");
            ExitCode::SUCCESS
        }
    }
}
