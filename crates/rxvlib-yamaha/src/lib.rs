//! Yamaha RX-V1600 RS-232C protocol codec for rxvlib.
//!
//! This crate knows what the receiver's frames mean. It provides:
//!
//! - **Command tables** ([`commands`]) -- symbolic command names to exact
//!   wire frames, plus absolute-set commands rendered with a hex value.
//! - **Report tables** ([`reports`]) -- report and display-text names, the
//!   human-readable value table, and decibel strings for volume reports.
//! - **Frame decoders** ([`protocol`]) -- pure parsers for report, display
//!   text, and configuration dump frames.
//! - **Status cache** ([`status`]) -- last known raw value per report.
//! - **Codec** ([`codec`]) -- [`RxV1600`], tying tables, decoders and cache
//!   together.
//! - **Monitor** ([`monitor`]) -- decodes link deliveries into broadcast
//!   [`RxvEvent`](rxvlib_core::RxvEvent)s.
//!
//! Moving bytes is not this crate's concern; see `rxvlib-link`.
//!
//! # Example
//!
//! ```
//! use rxvlib_yamaha::{Response, RxV1600};
//!
//! let mut rxv = RxV1600::new();
//! let ready = rxv.command("Ready").unwrap();
//! assert_eq!(ready, b"\x11000\x03");
//!
//! // The receiver reports main zone input "Dvd".
//! match rxv.decode_response(b"\x02002105\x03") {
//!     Response::Report(report) => assert_eq!(report.id, 0x21),
//!     other => panic!("unexpected {other:?}"),
//! }
//! assert_eq!(rxv.report_value_string(0x21).as_deref(), Some("Dvd"));
//! ```

pub mod codec;
pub mod commands;
pub mod monitor;
pub mod protocol;
pub mod reports;
pub mod status;

pub use codec::{Response, RxV1600};
pub use monitor::Monitor;
pub use protocol::{ConfigDump, DisplayText, Report};
pub use status::StatusCache;
