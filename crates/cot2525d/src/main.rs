use anyhow::{Context, Result};
use clap::Parser;
use cot2525d::{init_tracing, level_for, ServerConfig};

#[derive(Parser)]
#[command(name = "cot2525d")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MIL-STD-2525B symbol server for Cursor-on-Target types", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, env = "COT2525_LOG_JSON")]
    json: bool,

    #[command(flatten)]
    server: ServerConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json, level_for(cli.verbose));

    cot2525d::run(&cli.server)
        .await
        .with_context(|| format!("cot2525d failed serving {}", cli.server.images.display()))
}
