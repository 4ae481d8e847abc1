//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use textlens_client::{iam::DEFAULT_IAM_URL, nlu::DEFAULT_TIMEOUT_SECS, ClientConfig, NluClient};

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "8501")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// IAM token endpoint used to exchange API keys
    #[arg(long, default_value = DEFAULT_IAM_URL)]
    pub iam_url: String,

    /// Timeout for each outbound request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to ./textlens.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let client = NluClient::new(&ClientConfig {
        iam_url: args.iam_url.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
    });

    println!();
    println!(
        "  {} {}",
        "TextLens".cyan().bold(),
        "Web Server".bold()
    );
    println!();
    println!(
        "  {}  http://{}:{}",
        "Analysis".green(),
        args.host,
        args.port
    );
    println!(
        "  {}       http://{}:{}/api/analyse",
        "API".green(),
        args.host,
        args.port
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    textlens_web::run_server(Arc::new(client), &args.host, args.port).await?;

    Ok(())
}
