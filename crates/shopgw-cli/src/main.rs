use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopgw_catalog::{export::render_variant_report, CatalogClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopgw-cli")]
#[command(about = "Storefront gateway command line tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export every product and its variant ids to a flat text report.
    Export {
        /// Destination file for the report.
        #[arg(long, default_value = "products_variants.txt")]
        output: PathBuf,
        /// Upstream page size.
        #[arg(long, default_value_t = 100)]
        per_page: u32,
        /// Delay between page requests, in milliseconds.
        #[arg(long, default_value_t = 250)]
        delay_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shopgw_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Export {
            output,
            per_page,
            delay_ms,
        } => {
            let client = CatalogClient::new(
                config.provider,
                config.catalog_base_url.as_deref(),
                &config.shop_id,
                &config.catalog_api_key,
                config.request_timeout_secs,
                &config.user_agent,
            )?;
            let products = client.fetch_all_products(per_page, delay_ms).await?;
            let report = render_variant_report(&products, &config.cdn_account_hash);
            std::fs::write(&output, report)?;
            tracing::info!(
                path = %output.display(),
                products = products.len(),
                "variant report written"
            );
        }
    }

    Ok(())
}
