use anyhow::Result;
use clap::Parser;
use file_tailer::{DEFAULT_BUFFER_SIZE, TailEvent, TailStream, TailerConfig};
use std::path::PathBuf;
use std::time::Duration;
use tokio_stream::StreamExt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Follow a file and print every new line, like `tail -f`.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File to follow
    path: PathBuf,

    /// Delay between polls in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    delay_ms: u64,

    /// Skip existing content and print only what is appended
    #[arg(short = 'e', long)]
    from_end: bool,

    /// Read buffer size in bytes
    #[arg(short, long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = TailerConfig::new(&args.path)
        .with_delay(Duration::from_millis(args.delay_ms))
        .with_buffer_size(args.buffer_size);
    if args.from_end {
        config = config.from_end();
    }

    let mut stream = TailStream::new(config).await?;
    let handle = stream.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.stop();
        }
    });

    info!(path = %args.path.display(), "Following file");
    while let Some(event) = stream.next().await {
        match event {
            TailEvent::Line(line) => println!("{}", line),
            TailEvent::FileNotFound => warn!(path = %args.path.display(), "File not found"),
            TailEvent::FileRotated => info!(path = %args.path.display(), "File rotated"),
            TailEvent::Error(e) => warn!(error = %e, "Error while following file"),
            TailEvent::Stopped => break,
        }
    }

    Ok(())
}
