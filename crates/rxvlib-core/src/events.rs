//! Receiver event types.
//!
//! Events are emitted through a `tokio::sync::broadcast` channel when a
//! decoded frame changes the receiver's known state. Integration layers
//! (MQTT publishers, status pages) subscribe to these events instead of
//! decoding frames themselves.

use crate::types::{Guard, Origin};

/// An event emitted when a frame from the receiver has been decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum RxvEvent {
    /// A command/report frame updated one report.
    ReportChanged {
        /// Report identifier (e.g. `0x26` for main volume).
        id: u8,
        /// Symbolic report name, if the identifier is known.
        name: Option<&'static str>,
        /// Raw value now cached for the report.
        value: u8,
        /// Human-readable value, if one is defined or computable.
        text: Option<String>,
        /// Control path that caused the change.
        origin: Origin,
        /// Protection state of the function.
        guard: Guard,
    },

    /// A display text frame (tuner frequency, volume, input labels).
    DisplayText {
        /// Display type identifier.
        id: u8,
        /// Symbolic display name, if the identifier is known.
        name: Option<&'static str>,
        /// Right-justified display text, 8 characters.
        text: String,
    },

    /// A full configuration dump was decoded.
    ConfigReceived {
        /// `true` if the receiver reported its main power on (long dump).
        power: bool,
    },

    /// A complete frame that none of the decoders accepted.
    Unrecognized {
        /// The raw frame bytes.
        frame: Vec<u8>,
    },

    /// The link gave up on a request, or discarded an oversized frame.
    Timeout,
}
