// TikTok link resolver - HTTP entry point

use std::path::PathBuf;

use clap::Parser;
use tiktok_resolver::telemetry::{init_tracing, LogLevel};
use tiktok_resolver::AppConfig;

#[derive(Parser)]
#[command(name = "tiktok-resolver")]
#[command(about = "Resolve TikTok links to direct media URLs")]
struct Cli {
    /// JSON config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overrides config and RESOLVER_BIND
    #[arg(long)]
    bind: Option<String>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    tiktok_resolver::serve(&config).await?;
    Ok(())
}
