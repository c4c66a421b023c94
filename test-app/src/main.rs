// rxvlib test application -- CLI tool for driving a Yamaha RX-V1600 over
// RS-232C, or a scripted mock receiver when no hardware is attached.
//
// Usage:
//   rxvlib-test-app list
//   rxvlib-test-app --port /dev/ttyUSB0 config
//   rxvlib-test-app --port /dev/ttyUSB0 send MainVolume_Up
//   rxvlib-test-app --port /dev/ttyUSB0 set MainVolumeSet 0xC7
//   rxvlib-test-app --port /dev/ttyUSB0 monitor --duration 60
//   rxvlib-test-app --mock config
//
// Logging follows RUST_LOG; --log-level overrides it.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

use rxvlib::link::{LinkBuilder, PollerConfig, PollerHandle, spawn_poller};
use rxvlib::transport::{SerialConfig, SerialLink};
use rxvlib::yamaha::{Monitor, RxV1600, commands};
use rxvlib::{Clock, Error, Link, RxvEvent, SystemClock};
use rxvlib_test_harness::MockLink;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "rxvlib-test-app",
    version,
    about = "Exercise the RX-V1600 protocol engine against a receiver or a mock link"
)]
struct Cli {
    /// Serial port the receiver is attached to.
    #[arg(long, global = true)]
    port: Option<String>,

    /// Baud rate. The RX-V1600 only speaks 9600.
    #[arg(long, default_value_t = 9600, global = true)]
    baud: u32,

    /// Use a scripted mock receiver instead of a serial port.
    #[arg(long, global = true)]
    mock: bool,

    /// Interval between link manager polls, in milliseconds.
    #[arg(long, default_value_t = 10, global = true)]
    tick_ms: u64,

    /// Log filter (e.g. "debug", "rxvlib_link=trace"). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Parse a byte given as decimal or `0x`-prefixed hex.
fn parse_u8(s: &str) -> std::result::Result<u8, String> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).map_err(|e| format!("invalid hex byte: {e}")),
        None => s.parse::<u8>().map_err(|e| format!("invalid byte: {e}")),
    }
}

#[derive(Subcommand)]
enum Command {
    /// List every command name and parameterised format.
    List,

    /// Send a named command and print the receiver's reply.
    Send {
        /// Command name, e.g. MainVolume_Up.
        name: String,
    },

    /// Send a parameterised command with a value byte.
    Set {
        /// Format name, e.g. MainVolumeSet.
        name: String,
        /// Value byte, decimal or 0x-prefixed hex.
        #[arg(value_parser = parse_u8)]
        value: u8,
    },

    /// Print decoded frames as they arrive.
    Monitor {
        /// Stop after this many seconds (0 = run until Ctrl-C).
        #[arg(long, default_value_t = 0)]
        duration: u64,
    },

    /// Request the configuration dump and print every known report.
    Config,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Longest a single command can take: every attempt timing out.
fn reply_budget() -> Duration {
    let link = rxvlib::link::LinkConfig::default();
    link.timeout * link.max_tries + Duration::from_millis(500)
}

/// A running poller plus the monitor that decodes its deliveries.
struct Session<L, C> {
    handle: PollerHandle<L, C>,
    deliveries: UnboundedReceiver<Option<Vec<u8>>>,
    monitor: Monitor,
}

impl<L, C> Session<L, C>
where
    L: Link + 'static,
    C: Clock + 'static,
{
    fn start(link: L, clock: C, tick: Duration) -> Result<Self> {
        let manager = LinkBuilder::new()
            .build(link, clock)
            .context("failed to build link manager")?;
        let config = PollerConfig {
            tick,
            ..Default::default()
        };
        let (handle, deliveries) = spawn_poller(manager, config);
        Ok(Session {
            handle,
            deliveries,
            monitor: Monitor::new(),
        })
    }

    /// Wait for the next delivery and decode it.
    async fn next_event(&mut self, timeout: Duration) -> Result<Option<RxvEvent>> {
        match tokio::time::timeout(timeout, self.deliveries.recv()).await {
            Ok(Some(delivery)) => Ok(Some(self.monitor.handle(delivery.as_deref()))),
            Ok(None) => bail!("link task stopped"),
            Err(_) => Ok(None),
        }
    }

    /// Send a frame and return the event decoded from the first delivery
    /// that follows it.
    async fn request(&mut self, frame: Vec<u8>) -> Result<RxvEvent> {
        self.handle.send(frame).await?;
        match self.next_event(reply_budget()).await? {
            Some(event) => Ok(event),
            None => Err(Error::Timeout.into()),
        }
    }

    async fn finish(self) -> Result<()> {
        self.handle.shutdown().await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mock receiver
// ---------------------------------------------------------------------------

/// Configuration dump of a receiver in standby: system OK, power off,
/// input DVD.
const STANDBY_CONFIG: &[u8] = b"\x12R017800A000000000500\x03";

/// A mock receiver that answers a handful of commands, any number of
/// times and in any order.
fn scripted_mock() -> MockLink {
    let mock = MockLink::new();
    let script: &[(&str, &[u8])] = &[
        ("Ready", STANDBY_CONFIG),
        ("MainVolume_Up", b"\x020026C8\x03"),
        ("MainVolume_Down", b"\x020026C7\x03"),
        ("Mute_On", b"\x02002301\x03"),
        ("Mute_Off", b"\x02002300\x03"),
    ];
    for &(name, reply) in script {
        if let Some(frame) = commands::command(name) {
            mock.respond(frame, reply);
        }
    }
    mock
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

fn cmd_list() -> Result<()> {
    let mut names: Vec<&str> = commands::command_names().collect();
    names.sort_unstable();
    let width = names.iter().map(|n| n.len()).max().unwrap_or(12).max(12);

    println!("{:<width$}  Frame", "Command");
    println!("{:<width$}  -----", "-".repeat(width));
    for name in &names {
        if let Some(frame) = commands::command(name) {
            println!("{name:<width$}  {}", printable(frame));
        }
    }

    println!();
    println!("Formats (take a value byte):");
    for name in commands::format_names() {
        println!("  {name}");
    }
    println!();
    println!("{} commands total.", names.len());
    Ok(())
}

async fn cmd_send<L, C>(session: &mut Session<L, C>, name: &str) -> Result<()>
where
    L: Link + 'static,
    C: Clock + 'static,
{
    let codec = RxV1600::new();
    let Some(frame) = codec.command(name) else {
        return Err(Error::UnknownCommand(name.to_string())).context("try `list`");
    };
    println!("-> {}", printable(frame));
    let event = session.request(frame.to_vec()).await?;
    print_event(&event);
    Ok(())
}

async fn cmd_set<L, C>(session: &mut Session<L, C>, name: &str, value: u8) -> Result<()>
where
    L: Link + 'static,
    C: Clock + 'static,
{
    let codec = RxV1600::new();
    let Some(frame) = codec.command_value(name, value) else {
        return Err(Error::UnknownCommand(name.to_string())).context("try `list`");
    };
    println!("-> {}", printable(&frame));
    let event = session.request(frame).await?;
    print_event(&event);
    Ok(())
}

async fn cmd_monitor<L, C>(session: &mut Session<L, C>, duration_secs: u64) -> Result<()>
where
    L: Link + 'static,
    C: Clock + 'static,
{
    println!("Monitoring receiver frames (Ctrl-C to stop)...");

    let deadline = if duration_secs > 0 {
        Some(Instant::now() + Duration::from_secs(duration_secs))
    } else {
        None
    };

    loop {
        let timeout = match deadline {
            Some(dl) => {
                let remaining = dl.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    println!("Monitor duration elapsed.");
                    break;
                }
                remaining
            }
            None => Duration::from_secs(3600),
        };

        tokio::select! {
            event = session.next_event(timeout) => match event? {
                Some(event) => print_event(&event),
                None if deadline.is_some() => {
                    println!("Monitor duration elapsed.");
                    break;
                }
                None => {}
            },
            _ = tokio::signal::ctrl_c() => {
                println!("Interrupted.");
                break;
            }
        }
    }

    Ok(())
}

async fn cmd_config<L, C>(session: &mut Session<L, C>) -> Result<()>
where
    L: Link + 'static,
    C: Clock + 'static,
{
    let Some(ready) = commands::command("Ready") else {
        bail!("command table has no Ready entry");
    };
    let event = session.request(ready.to_vec()).await?;
    match event {
        RxvEvent::ConfigReceived { power } => {
            println!("Configuration received (power {}).", if power { "on" } else { "off" });
        }
        RxvEvent::Timeout => {
            return Err(Error::Timeout).context("receiver did not answer Ready");
        }
        other => {
            let detail = format!("unexpected reply to Ready: {other:?}");
            return Err(Error::Protocol(detail).into());
        }
    }

    let codec = session.monitor.codec();
    for (id, name, value) in codec.known_reports() {
        if let Some(value) = value {
            println!("  {id:02X}  {name:<24}  {value}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

/// Render a frame with control bytes shown as `<XX>`.
fn printable(frame: &[u8]) -> String {
    frame
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                (b as char).to_string()
            } else {
                format!("<{b:02X}>")
            }
        })
        .collect()
}

fn print_event(event: &RxvEvent) {
    match event {
        RxvEvent::ReportChanged {
            id,
            name,
            value,
            text,
            origin,
            guard,
        } => {
            println!(
                "<- report {id:02X} {} = {:02X} {} [{origin:?}, {guard:?}]",
                name.unwrap_or("?"),
                value,
                text.as_deref().unwrap_or(""),
            );
        }
        RxvEvent::DisplayText { id, name, text } => {
            println!("<- display {id:02X} {} \"{text}\"", name.unwrap_or("?"));
        }
        RxvEvent::ConfigReceived { power } => {
            println!("<- configuration (power {})", if *power { "on" } else { "off" });
        }
        RxvEvent::Unrecognized { frame } => {
            println!("<- unrecognized {}", printable(frame));
        }
        RxvEvent::Timeout => println!("<- timeout"),
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch<L, C>(link: L, clock: C, cli: &Cli) -> Result<()>
where
    L: Link + 'static,
    C: Clock + 'static,
{
    let mut session = Session::start(link, clock, Duration::from_millis(cli.tick_ms.max(1)))?;

    let outcome = match &cli.command {
        Command::List => cmd_list(),
        Command::Send { name } => cmd_send(&mut session, name).await,
        Command::Set { name, value } => cmd_set(&mut session, name, *value).await,
        Command::Monitor { duration } => cmd_monitor(&mut session, *duration).await,
        Command::Config => cmd_config(&mut session).await,
    };

    session.finish().await?;
    outcome
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    if matches!(cli.command, Command::List) {
        return cmd_list();
    }

    if cli.mock {
        tracing::info!("using scripted mock receiver");
        return dispatch(scripted_mock(), SystemClock::new(), &cli).await;
    }

    let Some(port) = cli.port.as_deref() else {
        bail!("--port is required unless --mock is given");
    };
    let config = SerialConfig {
        baud_rate: cli.baud,
        ..Default::default()
    };
    let link = SerialLink::open_with_config(port, config)
        .with_context(|| format!("failed to open {port}"))?;
    dispatch(link, SystemClock::new(), &cli).await
}

#[cfg(test)]
mod tests {
    use rxvlib::yamaha::reports::id;

    use super::*;

    fn mock_session() -> Session<MockLink, SystemClock> {
        Session::start(scripted_mock(), SystemClock::new(), Duration::from_millis(1)).unwrap()
    }

    fn command_frame(name: &str) -> Vec<u8> {
        commands::command(name).unwrap().to_vec()
    }

    #[test]
    fn parse_u8_accepts_decimal_and_hex() {
        assert_eq!(parse_u8("199"), Ok(199));
        assert_eq!(parse_u8("0xC7"), Ok(0xC7));
        assert_eq!(parse_u8("0Xc8"), Ok(0xC8));
        assert!(parse_u8("256").is_err());
        assert!(parse_u8("0x1FF").is_err());
    }

    #[test]
    fn printable_escapes_control_bytes() {
        assert_eq!(printable(b"\x0207A1A\x03"), "<02>07A1A<03>");
    }

    #[tokio::test]
    async fn mock_answers_scripted_commands_in_any_order() {
        let mut session = mock_session();

        let event = session.request(command_frame("MainVolume_Up")).await.unwrap();
        assert!(matches!(
            event,
            RxvEvent::ReportChanged { id: 0x26, value: 0xC8, .. }
        ));

        let event = session.request(command_frame("Mute_On")).await.unwrap();
        assert!(matches!(
            event,
            RxvEvent::ReportChanged { id: 0x23, value: 0x01, .. }
        ));

        for _ in 0..2 {
            let event = session.request(command_frame("Ready")).await.unwrap();
            assert_eq!(event, RxvEvent::ConfigReceived { power: false });
        }

        session.finish().await.unwrap();
    }

    #[tokio::test]
    async fn config_against_mock_fills_the_cache() {
        let mut session = mock_session();
        cmd_config(&mut session).await.unwrap();

        let codec = session.monitor.codec();
        assert_eq!(codec.report_value(id::SYSTEM), 0x00);
        assert_eq!(codec.report_value(id::POWER), 0x00);
        assert_eq!(codec.report_value(id::INPUT), 0x05);
        session.finish().await.unwrap();
    }

    #[tokio::test]
    async fn unknown_names_are_typed_errors() {
        let mut session = mock_session();

        let err = cmd_send(&mut session, "mainvolume_up").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::UnknownCommand(name)) if name == "mainvolume_up"
        ));

        let err = cmd_set(&mut session, "BassSet", 0x10).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::UnknownCommand(_))
        ));
        session.finish().await.unwrap();
    }
}
