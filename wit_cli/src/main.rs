mod commands;
mod output;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use wit_api::{Wit, WitConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "wit")]
#[command(about = "Send requests to the Wit.ai API")]
struct Cli {
    /// Access token (defaults to WIT_ACCESS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Wit API version sent as the `v` parameter
    #[arg(long, global = true)]
    api_version: Option<String>,

    /// Override the API host (e.g. a local mock server)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Output format: pretty or json
    #[arg(long, default_value = "pretty", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a GET request
    Get(commands::get::GetArgs),
    /// Send a POST request with a JSON body
    Post(commands::post::PostArgs),
    /// Send a DELETE request
    Delete(commands::delete::DeleteArgs),
}

impl Cli {
    fn config(&self) -> Result<WitConfig> {
        let mut config = WitConfig::from_env()?;
        if let Some(ref token) = self.token {
            config.default_access_token = Some(token.clone());
        }
        if let Some(ref version) = self.api_version {
            config.default_wit_version = version.clone();
        }
        if let Some(ref base_url) = self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(secs) = self.timeout {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wit_api=warn".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Pretty,
    };

    let wit = Wit::new(cli.config()?)?;
    tracing::debug!(
        base_url = wit.client().base_url(),
        version = wit.default_wit_version(),
        "Configured Wit client"
    );

    let result = match &cli.command {
        Commands::Get(args) => commands::get::run(args, &wit).await,
        Commands::Post(args) => commands::post::run(args, &wit).await,
        Commands::Delete(args) => commands::delete::run(args, &wit).await,
    };

    match result {
        Ok(resp) => {
            output::print_response(&resp, &format);
            Ok(())
        }
        Err(e) => {
            output::print_error(&e);
            std::process::exit(1);
        }
    }
}
