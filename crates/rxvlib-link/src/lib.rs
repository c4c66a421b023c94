//! Polled half-duplex link manager for the RX-V1600 RS-232C protocol.
//!
//! The receiver talks over a single duplex byte stream where every frame
//! starts with one of four ASCII control characters and ends with ETX. The
//! link may carry unsolicited status reports at any time, and at most one
//! command may be outstanding. This crate owns that byte-level problem and
//! nothing else: it does not know what frames mean.
//!
//! # Architecture
//!
//! - [`protocol`] -- frame markers, timing constants, and the frame accumulator
//! - [`manager`] -- the single-request send/retry/timeout state machine
//! - [`builder`] -- fluent configuration of link timing
//! - [`io`] -- a tokio task that ticks the manager and queues commands

pub mod builder;
pub mod io;
pub mod manager;
pub mod protocol;

pub use builder::LinkBuilder;
pub use io::{spawn_poller, PollerConfig, PollerHandle};
pub use manager::{LinkConfig, LinkManager, RecvCallback};
