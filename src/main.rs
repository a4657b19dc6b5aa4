//! Binance Futures Trading Bot - Entry Point
//!
//! Wiring sequence:
//! 1. Load `.env` (BINANCE_API_KEY, BINANCE_SECRET_KEY)
//! 2. Parse arguments (clap reads env fallbacks here)
//! 3. Run the command: config → tracing → audit log → client → bot
//! 4. Print `Error: <message>` and exit 1 on any failure

use std::process::ExitCode;

use clap::Parser;

use binance_futures_bot::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env is normal; real env vars still apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
