//! Send each stdin line as a UDP datagram.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UdpSocket;

use httpfromtcp::observability::logging;

#[derive(Parser)]
#[command(name = "udpsender")]
#[command(about = "Forward stdin lines to a UDP peer", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "localhost:42069")]
    target: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init("httpfromtcp=info,udpsender=info");

    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect(&cli.target).await?;
    tracing::info!(peer = %cli.target, "Sending stdin lines");

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = stdin.next_line().await? else {
            break;
        };
        socket.send(format!("{line}\n").as_bytes()).await?;
    }

    Ok(())
}
