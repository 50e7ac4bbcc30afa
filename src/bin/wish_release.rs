//! One-shot release job.
//!
//! Releases every active wish, prints the report as a single JSON line on
//! stdout, and exits 0 on success or 1 on failure. Scheduling and retries
//! belong to whatever triggers it.
//!
//! Reads the same `STORAGE_MODE`, `DATABASE_URL`, and `WISHES_TABLE` as the
//! API server.
//! Logs go to stderr so stdout carries only the report.

use std::process::ExitCode;

use wish_wall::application::{ReleaseReport, release_all_wishes};
use wish_wall::infrastructure::RepositoryFactory;
use wish_wall::infrastructure::logging::DEFAULT_FILTER;
use wish_wall::infrastructure::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing(DEFAULT_FILTER);

    let report = match RepositoryFactory::from_env() {
        Ok(factory) => match factory.create().await {
            Ok(repository) => release_all_wishes(repository.as_ref()).await,
            Err(error) => {
                tracing::error!(%error, "Failed to initialize wish repository");
                ReleaseReport::failed(error)
            }
        },
        Err(error) => {
            tracing::error!(%error, "Configuration error");
            ReleaseReport::failed(error)
        }
    };

    match serde_json::to_string(&report) {
        Ok(line) => println!("{line}"),
        Err(error) => tracing::error!(%error, "Failed to serialize release report"),
    }

    if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
