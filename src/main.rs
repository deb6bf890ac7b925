mod advice;
mod budget;
mod config;
mod db;
mod ledger;
mod models;
mod run;
mod store;
mod ui;

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advice::{Advisor, GeminiAdvisor, OfflineAdvisor};
use config::Config;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_env()?;
    init_logging(&config);

    let db = db::Database::open(&config.db_path())?;
    let mut store = store::Store::open(db);
    let advisor = build_advisor(&config);

    match args.len() {
        1 => run::as_tui(&mut store, advisor),
        2.. => run::as_cli(&args, &mut store, advisor.as_ref()),
        _ => {
            eprintln!("Usage: salarywise [command]");
            Ok(())
        }
    }
}

/// Log to a file under the data directory; the TUI owns the terminal.
fn init_logging(config: &Config) {
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: logging disabled, cannot open log file: {e}");
            return;
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| "salarywise=info".into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "SalaryWise starting");
}

fn build_advisor(config: &Config) -> Arc<dyn Advisor> {
    match GeminiAdvisor::from_config(&config.advice) {
        Ok(Some(gemini)) => {
            tracing::info!(model = %config.advice.model, "Tips enabled");
            Arc::new(gemini)
        }
        Ok(None) => {
            tracing::info!("No API key set, tips use the offline fallback");
            Arc::new(OfflineAdvisor)
        }
        Err(e) => {
            tracing::warn!("Tip service unavailable: {e:#}");
            Arc::new(OfflineAdvisor)
        }
    }
}
