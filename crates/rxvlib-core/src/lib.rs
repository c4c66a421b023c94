//! rxvlib-core: Core traits, types, and error definitions for rxvlib.
//!
//! This crate defines the device-agnostic abstractions that the link manager,
//! the RX-V1600 codec, and the serial transport share. Integration layers
//! (MQTT bridges, web panels) depend on these types without pulling in the
//! serial port implementation.
//!
//! # Key types
//!
//! - [`Link`] -- non-blocking duplex byte stream to the receiver
//! - [`Clock`] -- millisecond time source driving timeouts
//! - [`Origin`] / [`Guard`] -- metadata carried by report frames
//! - [`RxvEvent`] -- typed status notifications
//! - [`frame`] -- frame marker bytes shared by the link and the codec
//! - [`Error`] / [`Result`] -- error handling

pub mod clock;
pub mod error;
pub mod events;
pub mod frame;
pub mod link;
pub mod types;

// Re-export key types at crate root for ergonomic `use rxvlib_core::*`.
pub use clock::{Clock, SystemClock};
pub use error::{Error, Result};
pub use events::RxvEvent;
pub use link::Link;
pub use types::*;
