//! luxserver - collection lookup server
//!
//! Usage:
//!   luxserver <port>
//!
//! Serves object lookups from `./lux.sqlite` over newline-delimited JSON.
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use lux::config::{parse_port, ConfigError, ServerConfig};
use lux::server::Listener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "luxserver")]
#[command(about = "Answers object lookups against the collection store")]
#[command(version)]
struct Cli {
    /// TCP port to listen on (0-65535)
    #[arg(value_parser = port_arg, allow_hyphen_values = true)]
    port: u16,
}

fn port_arg(value: &str) -> Result<u16, ConfigError> {
    parse_port(value)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_error(err),
    };

    install_tracing_subscriber();

    let config = ServerConfig::new(cli.port);
    let listener = match Listener::bind(&config) {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%err, "cannot start server");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    listener.run().await;
    ExitCode::SUCCESS
}

fn usage_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        ErrorKind::ValueValidation => {
            eprintln!("error: {}", ConfigError::InvalidPort(String::new()));
            eprintln!("{}", Cli::command().render_usage());
            ExitCode::FAILURE
        }
        _ => {
            let _ = err.print();
            ExitCode::FAILURE
        }
    }
}

fn install_tracing_subscriber() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
