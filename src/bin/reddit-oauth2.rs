use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use reddit_oauth2::config::loader::file_to_config;
use reddit_oauth2::observability::metrics::gather_text;
use reddit_oauth2::utils::logging;
use reddit_oauth2::utils::logging::LogLevel;
use reddit_oauth2::TokenProvider;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "reddit-oauth2.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// Print `<token_type> <access_token>`, ready for an Authorization header
    #[arg(long)]
    header: bool,
    /// Dump metrics in the Prometheus text format to stderr before exiting
    #[arg(long)]
    print_metrics: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = file_to_config(Path::new(&args.config)).await?;
    logging::run(&service_config, args.log_level)?;

    // -------------------------------
    // 2. Build provider
    // -------------------------------

    let provider = TokenProvider::from_config(&service_config)?;

    // -------------------------------
    // 3. Fetch token
    // -------------------------------

    let exit_code = match provider.get_access_token().await {
        Ok(token) => {
            info!("token ready, type '{}'", token.token_type);
            if args.header {
                println!("{}", token.authorization_header());
            } else {
                println!("{}", token.access_token);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::from(err.code() as u8)
        }
    };

    if args.print_metrics {
        eprint!("{}", gather_text().await?);
    }

    Ok(exit_code)
}
