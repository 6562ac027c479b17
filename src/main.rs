use presign_upload::{Config, TerminalStatus};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    // Load configuration from CLI and/or config file
    let config = Config::load()?;
    let message = presign_upload::run(config, &TerminalStatus).await?;

    Ok(if message.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
