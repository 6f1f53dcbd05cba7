mod relay;
mod sse;

use std::io;

use libtrackor::config::Config;
use relay::Relay;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries protocol frames; all diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("trackor_proxy=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::load();
    let endpoint = config.resolve_endpoint(None)?;
    info!(endpoint = %endpoint, "Starting stdio relay");

    let mut relay = Relay::new(endpoint, &config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    relay.run(stdin.lock(), stdout.lock())?;

    info!("stdin closed, shutting down");
    Ok(())
}
