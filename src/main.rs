use std::process::ExitCode;

use clap::Parser;

use naver_sise::cli::Cli;
use naver_sise::{app, AppError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Dropping the run future abandons in-flight requests; lines already
    // written for finished symbols stay on stdout.
    let outcome = tokio::select! {
        result = app::run(cli) => result,
        Ok(()) = tokio::signal::ctrl_c() => Err(AppError::Cancelled),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Cancelled) => {
            log::error!("Interrupted by user");
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
