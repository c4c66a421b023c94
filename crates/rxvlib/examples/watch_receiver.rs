//! Watch an RX-V1600 and print every status change.
//!
//! Sends the `Ready` command to request a configuration dump, then prints
//! each decoded event for 60 seconds.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p rxvlib --example watch_receiver -- /dev/ttyUSB0
//! ```

use std::time::Duration;

use rxvlib::link::{spawn_poller, PollerConfig};
use rxvlib::yamaha::{Monitor, RxV1600};
use rxvlib::RxvEvent;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/ttyUSB0".to_string());
    println!("Opening {port}...");

    let manager = rxvlib::open_serial(&port)?;
    let (poller, mut frames) = spawn_poller(manager, PollerConfig::default());

    let mut monitor = Monitor::new();
    let mut events = monitor.subscribe();

    let ready = RxV1600::new()
        .command("Ready")
        .ok_or_else(|| anyhow::anyhow!("Ready missing from command table"))?;
    poller.send(ready.to_vec()).await?;

    let deadline = tokio::time::sleep(Duration::from_secs(60));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            Some(frame) = frames.recv() => {
                monitor.handle(frame.as_deref());
                while let Ok(event) = events.try_recv() {
                    match event {
                        RxvEvent::ReportChanged { name, text, value, .. } => {
                            println!(
                                "{:<18} {}",
                                name.unwrap_or("?"),
                                text.unwrap_or_else(|| format!("{value:#04x}"))
                            );
                        }
                        other => println!("{other:?}"),
                    }
                }
            }
        }
    }

    poller.shutdown().await?;
    Ok(())
}
