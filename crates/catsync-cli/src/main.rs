mod inject;
mod publish;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "catsync")]
#[command(about = "Lemon Squeezy catalog provisioning for the storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create products and variants on Lemon Squeezy and record the variant map
    Publish {
        /// Restrict publication to a single catalog item (by slug)
        #[arg(long)]
        slug: Option<String>,
    },
    /// Rewrite the storefront VARIANT_MAP block from the saved variant map
    Apply,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = catsync_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Publish { slug } => publish::run(&config, slug.as_deref()).await,
        Commands::Apply => inject::run(&config),
    }
}
