use anyhow::Result;
use clap::Parser;

use dioca_auth::CredentialPolicy;
use dioca_cli::{AppConfig, Args, Controller, repl};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from(Args::parse());

    dioca_observability::init(&config.log);
    tracing::info!(
        username = %config.credentials.username,
        log_format = ?config.log.format,
        "starting dioca"
    );

    let controller = Controller::new(CredentialPolicy::fixed(config.credentials));
    repl::run(controller)
}
