//! csvdiff-web: HTTP upload/review service
//!
//! Serves the same diff core as the CLI over two JSON endpoints; see
//! [`api`] for the endpoint contracts.

mod api;

use api::ServerConfig;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "csvdiff-web")]
#[command(about = "CSV diff upload/review service", long_about = None)]
#[command(version)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// Maximum total upload size in bytes
    #[arg(long, default_value_t = 16 * 1024 * 1024)]
    max_upload_bytes: usize,

    /// Where /save writes the merged result
    #[arg(long, default_value = "merged_result.csv")]
    output: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Arc::new(ServerConfig {
        max_upload_bytes: cli.max_upload_bytes,
        output_path: cli.output,
    });

    let app = api::router(config);

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    tracing::info!(addr = %cli.bind, "listening");

    axum::serve(listener, app).await
}
