//! LinkBuilder -- fluent builder for constructing [`LinkManager`] instances.
//!
//! The defaults match what the RX-V1600 expects on its RS-232C port. Tests
//! and slow adapters can shorten or stretch the timing without touching the
//! state machine.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use rxvlib_core::SystemClock;
//! use rxvlib_link::LinkBuilder;
//! use rxvlib_test_harness::MockLink;
//!
//! let manager = LinkBuilder::new()
//!     .timeout(Duration::from_millis(500))
//!     .max_tries(3)
//!     .build(MockLink::new(), SystemClock::new())
//!     .unwrap();
//! assert_eq!(manager.config().max_tries, 3);
//! ```

use std::time::Duration;

use rxvlib_core::clock::Clock;
use rxvlib_core::error::{Error, Result};
use rxvlib_core::link::Link;

use crate::manager::{LinkConfig, LinkManager};

/// Smallest useful frame buffer: one report frame.
const MIN_FRAME_LEN: usize = 8;

/// Fluent builder for [`LinkManager`].
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    config: LinkConfig,
}

impl LinkBuilder {
    /// Create a builder with the protocol's default timing.
    pub fn new() -> Self {
        LinkBuilder {
            config: LinkConfig::default(),
        }
    }

    /// Response timeout before a resend (default: 1000ms).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Transmissions before giving up on a command (default: 5).
    pub fn max_tries(mut self, n: u32) -> Self {
        self.config.max_tries = n;
        self
    }

    /// Idle time required after inbound traffic before transmitting
    /// (default: 50ms).
    pub fn quiet_window(mut self, window: Duration) -> Self {
        self.config.quiet_window = window;
        self
    }

    /// Frame buffer bound (default: 256 bytes).
    pub fn max_frame_len(mut self, len: usize) -> Self {
        self.config.max_frame_len = len;
        self
    }

    /// Validate the configuration and build the manager around `link`.
    pub fn build<L: Link, C: Clock>(self, link: L, clock: C) -> Result<LinkManager<L, C>> {
        if self.config.max_tries == 0 {
            return Err(Error::InvalidParameter(
                "max_tries must be at least 1".into(),
            ));
        }
        if self.config.max_frame_len < MIN_FRAME_LEN {
            return Err(Error::InvalidParameter(format!(
                "max_frame_len must be at least {MIN_FRAME_LEN}, got {}",
                self.config.max_frame_len
            )));
        }
        Ok(LinkManager::with_config(link, clock, self.config))
    }
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
