use file_tailer::{TailEvent, TailStream, TailerConfig};
use std::time::Duration;
use tokio_stream::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Follow a log file, polling every 250ms
    let config = TailerConfig::new("app.log").with_delay(Duration::from_millis(250));
    let mut stream = TailStream::new(config).await?;

    println!("Following app.log - printing the first 10 lines...");

    let mut count = 0;
    while let Some(event) = stream.next().await {
        match event {
            TailEvent::Line(line) => {
                count += 1;
                println!("  [{}]: {}", count, line);
            }
            TailEvent::FileNotFound => println!("Waiting for app.log to appear..."),
            TailEvent::FileRotated => println!("--- rotated ---"),
            TailEvent::Error(e) => {
                eprintln!("Error: {}", e);
                break;
            }
            TailEvent::Stopped => break,
        }

        if count >= 10 {
            // Only show the first few lines for demo
            stream.stop();
        }
    }

    Ok(())
}
