//! Credential store bootstrap
//!
//! Loads configuration, prepares the accounts database at the configured
//! location and reports how many accounts it holds.

use log::info;
use std::process::ExitCode;

use credential_store::error::handlers::handle_error;
use credential_store::utils::setup_logging;
use credential_store::{CredentialError, CredentialStore, StoreConfig};

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handle_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CredentialError> {
    // optional first argument names an alternate config file
    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::load_from(&path),
        None => StoreConfig::load(),
    }?;

    info!("Preparing credential store...");
    let store = CredentialStore::initialize(config).await?;
    let accounts = store.account_count().await?;

    info!(
        "Credential store at {} holds {} account(s)",
        store.location().display(),
        accounts
    );
    Ok(())
}
