//! rxvlib-test-harness: Test utilities for rxvlib.
//!
//! This crate provides [`MockLink`] for deterministic testing of the link
//! manager and codec without a receiver attached, and [`ManualClock`] for
//! stepping time through timeouts and quiet windows explicitly.

pub mod clock;
pub mod mock_serial;

pub use clock::ManualClock;
pub use mock_serial::MockLink;
