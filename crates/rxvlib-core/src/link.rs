//! Link trait for receiver communication.
//!
//! The [`Link`] trait abstracts over the physical byte stream to the
//! receiver. The RX-V1600 is driven by a polled state machine, so unlike a
//! request/response transport the link never blocks: reads report whether a
//! byte is available right now, and writes hand bytes to the port's TX
//! buffer.
//!
//! Implementations exist for serial ports (`rxvlib-transport`) and for
//! deterministic tests (`MockLink` in `rxvlib-test-harness`).

use crate::error::Result;

/// Non-blocking duplex byte stream to the receiver.
pub trait Link: Send {
    /// Take the next received byte, if one is available.
    ///
    /// Returns `Ok(None)` when nothing is pending. Must not block.
    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Queue `data` for transmission.
    fn write_all(&mut self, data: &[u8]) -> Result<()>;
}

impl<L: Link + ?Sized> Link for Box<L> {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        (**self).read_byte()
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_all(data)
    }
}
