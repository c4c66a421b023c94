//! # rxvlib -- Serial protocol engine for Yamaha RX-V1600 receivers
//!
//! `rxvlib` drives the RS-232C port of a Yamaha RX-V1600 AV receiver. It
//! turns symbolic commands (`"MainVolume_Up"`) into exact frames, sends
//! them one at a time with timeout and retry, and decodes the receiver's
//! solicited and unsolicited frames into a status cache and typed events.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rxvlib::yamaha::{Monitor, RxV1600};
//!
//! # fn main() -> rxvlib::Result<()> {
//! let mut manager = rxvlib::open_serial("/dev/ttyUSB0")?;
//! let mut monitor = Monitor::new();
//! let mut events = monitor.subscribe();
//!
//! let ready = RxV1600::new().command("Ready").unwrap();
//! manager.send(ready);
//! manager.on_recv(move |frame| {
//!     monitor.handle(frame);
//! });
//!
//! loop {
//!     manager.process()?;
//!     while let Ok(event) = events.try_recv() {
//!         println!("{event:?}");
//!     }
//!     std::thread::sleep(std::time::Duration::from_millis(10));
//! }
//! # }
//! ```
//!
//! ## Architecture
//!
//! | Crate                 | Purpose                                          |
//! |-----------------------|--------------------------------------------------|
//! | `rxvlib-core`         | [`Link`] and [`Clock`] traits, types, errors     |
//! | `rxvlib-link`         | Polled link manager, builder, tokio poller       |
//! | `rxvlib-yamaha`       | Command tables, frame decoders, status cache     |
//! | `rxvlib-transport`    | Serial port [`Link`]                             |
//! | **`rxvlib`**          | This facade crate -- re-exports everything       |
//!
//! ## Feature Flags
//!
//! | Feature  | Enables                                  | Default |
//! |----------|------------------------------------------|---------|
//! | `serial` | [`transport`] module and [`open_serial`] | yes     |

pub use rxvlib_core::*;

/// Link manager: framing, single-request retry, and the tokio poller.
pub mod link {
    pub use rxvlib_link::*;
}

/// RX-V1600 codec: command tables, frame decoders, status cache, monitor.
pub mod yamaha {
    pub use rxvlib_yamaha::*;
}

/// Serial port link.
#[cfg(feature = "serial")]
pub mod transport {
    pub use rxvlib_transport::*;
}

/// Open `port` at the receiver's fixed 9600 baud and wrap it in a link
/// manager with default timing.
#[cfg(feature = "serial")]
pub fn open_serial(
    port: &str,
) -> Result<link::LinkManager<transport::SerialLink, SystemClock>> {
    let serial = transport::SerialLink::open_with_config(port, transport::SerialConfig::default())?;
    link::LinkBuilder::new().build(serial, SystemClock::new())
}
