use std::process::ExitCode;

use firebase_tokencreator::{
    config::{self, CliConfig},
    logging,
    runner::{run_until_interrupted, Runner},
    utils::interrupt_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    config::load_dotenv();
    logging::init("info");

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = e.write_startup_report(&mut std::io::stderr());
            return ExitCode::FAILURE;
        }
    };

    let runner = match Runner::from_config(&config, &config::program_dir()) {
        Ok(runner) => runner,
        Err(e) => {
            tracing::debug!("{:?}", e);
            let _ = e.write_startup_report(&mut std::io::stderr());
            return ExitCode::FAILURE;
        }
    };
    println!("✅ Firebase Admin initialized successfully");

    let mut stdout = std::io::stdout();
    match run_until_interrupted(&runner, &mut stdout, interrupt_signal()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Failed to write token report: {}", e);
            ExitCode::FAILURE
        }
    }
}
