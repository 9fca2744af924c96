use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use dev_proxy::config::{load_shared, ProxyConfig, SharedConfig};
use dev_proxy::error::chain;
use dev_proxy::lifecycle;
use dev_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "dev-proxy")]
#[command(about = "Routes API and client traffic of a local dev stack through one port", long_about = None)]
struct Cli {
    /// TOML file with settings shared across the dev stack (api_port, log_level)
    #[arg(long, env = "SHARED_CONFIG")]
    shared_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match start(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", report(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: Cli) -> Result<(), Box<dyn Error>> {
    let shared = match &cli.shared_config {
        Some(path) => load_shared(path)?,
        None => SharedConfig::default(),
    };
    let config = ProxyConfig::from_env(&shared)?;

    logging::init(config.log_level);

    lifecycle::run(config).await?;
    Ok(())
}

/// Human-readable failure line printed before exiting non-zero.
fn report(err: &dyn Error) -> String {
    format!("error: {}", chain(err))
}
