//! Single-request link state machine.
//!
//! [`LinkManager`] owns the byte link and is driven by periodic calls to
//! [`LinkManager::process`]. Each call drains every pending inbound byte
//! into the frame accumulator, then decides whether the one outstanding
//! command (if any) should be sent, resent, or given up on.
//!
//! Transmission is gated by a quiet window: after any inbound byte, the
//! manager waits until the line has been idle for longer than
//! [`LinkConfig::quiet_window`] before writing. The receiver streams
//! unsolicited reports, and talking over one of them corrupts both.
//!
//! The manager does not correlate responses with requests. Any complete
//! frame that arrives while a transmitted command is outstanding counts as
//! its response.

use std::fmt;
use std::time::Duration;

use tracing::{debug, trace, warn};

use rxvlib_core::clock::Clock;
use rxvlib_core::error::Result;
use rxvlib_core::link::Link;

use crate::protocol::{self, FrameAccumulator, Push};

/// Receives every completed frame as `Some(bytes)` and every failure
/// (retries exhausted, oversize frame) as `None`.
///
/// The slice is only valid for the duration of the call.
pub type RecvCallback = Box<dyn FnMut(Option<&[u8]>) + Send>;

/// Timing and sizing parameters for a [`LinkManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// How long to wait for a response before resending.
    pub timeout: Duration,
    /// Number of transmissions before giving up on a command.
    pub max_tries: u32,
    /// Required idle time after inbound traffic before transmitting.
    pub quiet_window: Duration,
    /// Frame buffer bound; longer frames are discarded.
    pub max_frame_len: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            timeout: Duration::from_millis(protocol::TIMEOUT_MS),
            max_tries: protocol::MAX_TRIES,
            quiet_window: Duration::from_millis(protocol::QUIET_WINDOW_MS),
            max_frame_len: protocol::MAX_FRAME_LEN,
        }
    }
}

/// The one command the manager is trying to get answered.
#[derive(Debug)]
struct InFlight {
    cmd: Vec<u8>,
    tries: u32,
    /// When the latest transmission happened; `None` until the first one.
    sent_ms: Option<u64>,
}

/// Polled link manager for a half-duplex framed protocol.
pub struct LinkManager<L, C> {
    link: L,
    clock: C,
    config: LinkConfig,
    callback: Option<RecvCallback>,
    request: Option<InFlight>,
    frame: FrameAccumulator,
    /// Time of the latest inbound byte or outbound write, cleared once the
    /// quiet window has elapsed.
    last_activity: Option<u64>,
}

impl<L: Link, C: Clock> LinkManager<L, C> {
    /// Create a manager with the default protocol timing.
    pub fn new(link: L, clock: C) -> Self {
        Self::with_config(link, clock, LinkConfig::default())
    }

    /// Create a manager with explicit timing.
    pub fn with_config(link: L, clock: C, config: LinkConfig) -> Self {
        LinkManager {
            frame: FrameAccumulator::new(config.max_frame_len),
            link,
            clock,
            config,
            callback: None,
            request: None,
            last_activity: None,
        }
    }

    /// Register the frame consumer, replacing any previous one.
    pub fn on_recv<F>(&mut self, callback: F)
    where
        F: FnMut(Option<&[u8]>) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Queue `cmd` as the outstanding command.
    ///
    /// Returns `false` without changing anything if a command is already
    /// outstanding. Nothing is written until the next [`process`](Self::process)
    /// call finds the line quiet.
    pub fn send(&mut self, cmd: &[u8]) -> bool {
        if self.request.is_some() {
            debug!(cmd = %cmd.escape_ascii(), "link busy, rejecting command");
            return false;
        }

        trace!(cmd = %cmd.escape_ascii(), "command queued");
        self.request = Some(InFlight {
            cmd: cmd.to_vec(),
            tries: 0,
            sent_ms: None,
        });
        true
    }

    /// Make the outstanding command fail at its next due point instead of
    /// being resent.
    pub fn abort(&mut self) {
        if let Some(request) = self.request.as_mut() {
            debug!(tries = request.tries, "aborting outstanding command");
            request.tries = self.config.max_tries;
        }
    }

    /// Drain inbound bytes, deliver completed frames, and (re)transmit.
    ///
    /// Link errors are returned after the bytes read so far have been
    /// processed; the manager's state stays consistent.
    pub fn process(&mut self) -> Result<()> {
        let now = self.clock.now_ms();

        while let Some(byte) = self.link.read_byte()? {
            self.last_activity = Some(now);

            match self.frame.push(byte) {
                Push::Ignored => trace!(byte, "dropping byte outside a frame"),
                Push::Partial => {}
                Push::Complete => {
                    debug!(frame = %self.frame.frame().escape_ascii(), "frame received");
                    self.settle_transmitted();
                    if let Some(callback) = self.callback.as_mut() {
                        callback(Some(self.frame.frame()));
                    }
                    self.frame.reset();
                }
                Push::Overflow => {
                    warn!(len = self.frame.len(), "frame exceeds buffer, discarding");
                    self.settle_transmitted();
                    self.frame.reset();
                    self.deliver_failure();
                }
            }
        }

        if let Some(last) = self.last_activity {
            if now.saturating_sub(last) > self.quiet_window_ms() {
                self.last_activity = None;
            }
        }
        if self.last_activity.is_some() {
            return Ok(());
        }

        let timeout_ms = self.timeout_ms();
        let max_tries = self.config.max_tries;
        let Some(request) = self.request.as_mut() else {
            return Ok(());
        };

        let due = match request.sent_ms {
            None => true,
            Some(sent) => now.saturating_sub(sent) > timeout_ms,
        };
        if !due {
            return Ok(());
        }

        request.tries += 1;
        if request.tries > max_tries {
            warn!(
                cmd = %request.cmd.escape_ascii(),
                tries = max_tries,
                "no response, giving up"
            );
            self.request = None;
            self.deliver_failure();
            return Ok(());
        }

        if request.tries > 1 {
            debug!(attempt = request.tries, cmd = %request.cmd.escape_ascii(), "resending command");
        } else {
            debug!(cmd = %request.cmd.escape_ascii(), "sending command");
        }
        request.sent_ms = Some(now);
        self.last_activity = Some(now);
        self.link.write_all(&request.cmd)
    }

    /// Whether a command is outstanding.
    pub fn is_busy(&self) -> bool {
        self.request.is_some()
    }

    /// Transmissions made so far for the outstanding command.
    pub fn attempts(&self) -> Option<u32> {
        self.request.as_ref().map(|r| r.tries)
    }

    /// The outstanding command, if any.
    pub fn pending_command(&self) -> Option<&[u8]> {
        self.request.as_ref().map(|r| r.cmd.as_slice())
    }

    /// The active timing configuration.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Borrow the underlying link.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Mutably borrow the underlying link.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// A frame ended (or was discarded) while a command was outstanding.
    ///
    /// Only a command that has actually been written can be answered; a
    /// queued-but-unsent command survives unsolicited traffic.
    fn settle_transmitted(&mut self) {
        if self.request.as_ref().is_some_and(|r| r.sent_ms.is_some()) {
            self.request = None;
        }
    }

    fn deliver_failure(&mut self) {
        if let Some(callback) = self.callback.as_mut() {
            callback(None);
        }
    }

    fn timeout_ms(&self) -> u64 {
        self.config.timeout.as_millis() as u64
    }

    fn quiet_window_ms(&self) -> u64 {
        self.config.quiet_window.as_millis() as u64
    }
}

impl<L, C> fmt::Debug for LinkManager<L, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkManager")
            .field("config", &self.config)
            .field("request", &self.request)
            .field("buffered", &self.frame.len())
            .field("last_activity", &self.last_activity)
            .finish_non_exhaustive()
    }
}
