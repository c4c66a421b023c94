//! Frame markers and frame accumulation for the RX-V1600 serial link.
//!
//! Every frame begins with one of four single-byte markers and ends with
//! ETX. The frame shape is determined entirely by the start marker:
//!
//! | Marker | Role                          |
//! |--------|-------------------------------|
//! | `STX`  | Command / report frame        |
//! | `DC1`  | Ready command, display text   |
//! | `DC2`  | Configuration dump            |
//! | `DC3`  | Reset-to-defaults command     |
//!
//! [`FrameAccumulator`] turns a byte stream into frames without looking at
//! anything but those markers.

use bytes::BytesMut;

pub use rxvlib_core::frame::{DC1, DC2, DC3, DEL, ETX, STX};

/// How long to wait for a complete response before resending a command.
pub const TIMEOUT_MS: u64 = 1000;

/// How many times a command is sent before giving up.
pub const MAX_TRIES: u32 = 5;

/// Minimum idle time after inbound traffic before the link may transmit.
pub const QUIET_WINDOW_MS: u64 = 50;

/// Largest frame the accumulator holds before discarding.
///
/// The configuration dump is the longest frame at 157 bytes.
pub const MAX_FRAME_LEN: usize = 256;

/// Returns `true` if `byte` may start a frame.
pub fn is_frame_start(byte: u8) -> bool {
    matches!(byte, STX | DC1 | DC2 | DC3)
}

/// Outcome of feeding one byte to a [`FrameAccumulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Push {
    /// The byte could not start a frame and was dropped.
    Ignored,
    /// The byte was stored; the frame is not complete yet.
    Partial,
    /// The byte was ETX; [`FrameAccumulator::frame`] holds a complete frame.
    Complete,
    /// The buffer is full without a terminator; the frame must be discarded.
    Overflow,
}

/// Accumulates bytes from the frame-start marker up to and including ETX.
#[derive(Debug)]
pub struct FrameAccumulator {
    buf: BytesMut,
    max_len: usize,
}

impl FrameAccumulator {
    /// Create an accumulator bounded to `max_len` bytes.
    pub fn new(max_len: usize) -> Self {
        FrameAccumulator {
            buf: BytesMut::with_capacity(max_len),
            max_len,
        }
    }

    /// Feed one byte.
    ///
    /// After [`Push::Complete`] or [`Push::Overflow`] the caller must
    /// [`reset`](Self::reset) before feeding more bytes.
    pub fn push(&mut self, byte: u8) -> Push {
        if self.buf.is_empty() && !is_frame_start(byte) {
            return Push::Ignored;
        }

        self.buf.extend_from_slice(&[byte]);

        if byte == ETX {
            Push::Complete
        } else if self.buf.len() >= self.max_len {
            Push::Overflow
        } else {
            Push::Partial
        }
    }

    /// The bytes accumulated so far.
    pub fn frame(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes accumulated so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no frame is in progress.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard the current frame.
    pub fn reset(&mut self) {
        self.buf.clear();
    }
}
