//! Link implementations for rxvlib.
//!
//! This crate provides the concrete [`Link`](rxvlib_core::Link) used to talk
//! to a real receiver:
//!
//! - [`SerialLink`]: RS-232C serial connection (USB adapters included)
//!
//! Tests use `MockLink` from `rxvlib-test-harness` instead.

pub mod serial;

pub use serial::{
    available_ports, DataBits, FlowControl, Parity, SerialConfig, SerialLink, StopBits,
};
