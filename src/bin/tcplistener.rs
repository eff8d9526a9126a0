//! Print every line received on each TCP connection.

use clap::Parser;
use tokio::net::TcpListener;

use httpfromtcp::lines::LineReader;
use httpfromtcp::observability::logging;

#[derive(Parser)]
#[command(name = "tcplistener")]
#[command(about = "Print newline-delimited input from TCP clients", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "127.0.0.1:42069")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init("httpfromtcp=info,tcplistener=info");

    let listener = TcpListener::bind(&cli.bind).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        tracing::info!(peer_addr = %peer_addr, "Connection started");

        let mut lines = LineReader::new(stream);
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => println!("read: {line}"),
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(peer_addr = %peer_addr, error = %e, "Read failed");
                    break;
                }
            }
        }
        tracing::info!(peer_addr = %peer_addr, "Connection closed");
    }
}
