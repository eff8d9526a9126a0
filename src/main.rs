//! Demo HTTP server.
//!
//! ```text
//! GET /yourproblem → 400 "Your problem is not my problem"
//! GET /myproblem   → 500 "Woopsie, my bad"
//! anything else    → 200 "All good, frfr"
//! ```

use std::path::PathBuf;

use clap::Parser;

use httpfromtcp::config::{load_config, ServerConfig};
use httpfromtcp::lifecycle::{signals, Shutdown};
use httpfromtcp::observability::logging;
use httpfromtcp::{HandlerError, Request, Server, StatusCode};

#[derive(Parser)]
#[command(name = "httpserver")]
#[command(about = "Minimal HTTP/1.1 server over raw TCP", long_about = None)]
struct Cli {
    /// TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

fn handler(body: &mut Vec<u8>, request: &Request) -> Result<(), HandlerError> {
    match request.request_line.target.as_str() {
        "/yourproblem" => Err(HandlerError::new(
            StatusCode::BAD_REQUEST,
            "Your problem is not my problem\n",
        )),
        "/myproblem" => Err(HandlerError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Woopsie, my bad\n",
        )),
        _ => {
            body.extend_from_slice(b"All good, frfr\n");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_filter);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        read_buffer_size = config.parser.read_buffer_size,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let server = Server::serve_with_shutdown(&config, std::sync::Arc::new(handler), shutdown.clone()).await?;
    tracing::info!(address = %server.local_addr(), "Server started");

    signals::shutdown_on_ctrl_c(shutdown).await;
    server.close();
    server.closed().await;

    tracing::info!("Server gracefully stopped");
    Ok(())
}
