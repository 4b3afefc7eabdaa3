use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use client::cli::{self, Cli};
use client::config::Config;
use client::state::AppContext;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }
    if let Some(path) = args.session_file {
        config.session_file = path;
    }

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Volunteer portal client v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api_base_url
    );

    let mut ctx = AppContext::from_config(config)?;

    if cli::run(&mut ctx, args.command).await {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
