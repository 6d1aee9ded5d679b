//! Command-line and environment configuration.

use clap::Parser;

use dioca_auth::{Credentials, DEFAULT_PASSWORD, DEFAULT_USERNAME};
use dioca_observability::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(name = "dioca", about = "Dioca Store inventory terminal")]
pub struct Args {
    #[arg(
        long,
        env = "DIOCA_USERNAME",
        default_value = DEFAULT_USERNAME,
        help = "Username accepted at login"
    )]
    pub username: String,

    #[arg(
        long,
        env = "DIOCA_PASSWORD",
        default_value = DEFAULT_PASSWORD,
        hide_env_values = true,
        hide_default_value = true,
        help = "Password accepted at login"
    )]
    pub password: String,

    #[arg(
        long,
        env = "DIOCA_LOG_FORMAT",
        default_value = "compact",
        help = "Log format: compact or json"
    )]
    pub log_format: LogFormat,

    #[arg(
        long,
        env = "DIOCA_LOG",
        default_value = "warn",
        help = "Log filter (RUST_LOG wins when set)"
    )]
    pub log_level: String,
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub log: LogConfig,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        Self {
            credentials: Credentials::new(args.username, args.password),
            log: LogConfig {
                format: args.log_format,
                level: args.log_level,
            },
        }
    }
}
