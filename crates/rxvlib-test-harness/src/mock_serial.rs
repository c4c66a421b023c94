//! Mock link for deterministic testing of the protocol engine.
//!
//! [`MockLink`] implements the [`Link`] trait on top of an in-memory inbound
//! queue. Bytes can be injected directly (unsolicited device chatter) or
//! pre-loaded as replies to specific requests, and every write is logged.
//!
//! # Example
//!
//! ```
//! use rxvlib_core::Link;
//! use rxvlib_test_harness::MockLink;
//!
//! let mut mock = MockLink::new();
//! // When the engine sends "MainVolume_Up", the receiver reports volume 0xC8.
//! mock.expect(b"\x0207A1A\x03", b"\x020026C8\x03");
//! mock.write_all(b"\x0207A1A\x03").unwrap();
//! assert_eq!(mock.read_byte().unwrap(), Some(0x02));
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use rxvlib_core::error::{Error, Result};
use rxvlib_core::link::Link;

/// A pre-loaded request/response pair.
#[derive(Debug, Clone)]
struct Expectation {
    /// The exact bytes that trigger the reply.
    request: Vec<u8>,
    /// The bytes queued for reading once the request is written.
    response: Vec<u8>,
}

#[derive(Debug)]
struct Inner {
    /// Bytes waiting to be read by the engine.
    inbound: VecDeque<u8>,
    /// Ordered queue of expected request/response pairs.
    expectations: VecDeque<Expectation>,
    /// Replies sent every time their request is written, in any order.
    standing: Vec<Expectation>,
    /// Log of all bytes written, one entry per `write_all()` call.
    sent_log: Vec<Vec<u8>>,
    /// Whether the link is "connected".
    connected: bool,
}

/// A mock [`Link`] for testing without hardware.
///
/// Clones share state, so a test can keep a handle for injecting bytes and
/// inspecting writes while the link manager owns another clone.
///
/// Expectations are consumed in order. A write matching the next
/// expectation queues its response for reading. Standing replies registered
/// with [`respond`](MockLink::respond) answer their request every time, in
/// any order. Writes that match nothing are logged and answered with
/// silence, which is how a receiver that is switched off behaves.
#[derive(Debug, Clone)]
pub struct MockLink {
    inner: Arc<Mutex<Inner>>,
}

impl MockLink {
    /// Create a new mock link in the connected state.
    pub fn new() -> Self {
        MockLink {
            inner: Arc::new(Mutex::new(Inner {
                inbound: VecDeque::new(),
                expectations: VecDeque::new(),
                standing: Vec::new(),
                sent_log: Vec::new(),
                connected: true,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add an expected request/response pair.
    pub fn expect(&self, request: &[u8], response: &[u8]) {
        self.lock().expectations.push_back(Expectation {
            request: request.to_vec(),
            response: response.to_vec(),
        });
    }

    /// Answer `request` with `response` every time it is written.
    ///
    /// Standing replies are not consumed and ignore ordering; a matching
    /// [`expect`](Self::expect) at the front of the queue takes precedence.
    pub fn respond(&self, request: &[u8], response: &[u8]) {
        self.lock().standing.push(Expectation {
            request: request.to_vec(),
            response: response.to_vec(),
        });
    }

    /// Queue bytes as if the receiver had sent them unprompted.
    pub fn push_inbound(&self, data: &[u8]) {
        self.lock().inbound.extend(data.iter().copied());
    }

    /// Return a copy of all data written through this link.
    pub fn sent_data(&self) -> Vec<Vec<u8>> {
        self.lock().sent_log.clone()
    }

    /// Number of `write_all()` calls so far.
    pub fn sent_count(&self) -> usize {
        self.lock().sent_log.len()
    }

    /// Number of inbound bytes not yet read.
    pub fn pending_inbound(&self) -> usize {
        self.lock().inbound.len()
    }

    /// Return the number of expectations that have not yet been consumed.
    pub fn remaining_expectations(&self) -> usize {
        self.lock().expectations.len()
    }

    /// Set the connected state of the mock link.
    ///
    /// When set to `false`, reads and writes return [`Error::NotConnected`].
    pub fn set_connected(&self, connected: bool) {
        self.lock().connected = connected;
    }
}

impl Default for MockLink {
    fn default() -> Self {
        Self::new()
    }
}

impl Link for MockLink {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut inner = self.lock();
        if !inner.connected {
            return Err(Error::NotConnected);
        }
        Ok(inner.inbound.pop_front())
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let mut inner = self.lock();
        if !inner.connected {
            return Err(Error::NotConnected);
        }

        inner.sent_log.push(data.to_vec());

        let matches = inner
            .expectations
            .front()
            .is_some_and(|e| e.request.as_slice() == data);
        let reply = if matches {
            inner.expectations.pop_front().map(|e| e.response)
        } else {
            inner
                .standing
                .iter()
                .find(|e| e.request.as_slice() == data)
                .map(|e| e.response.clone())
        };
        if let Some(reply) = reply {
            inner.inbound.extend(reply);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_link_reply_to_expected_request() {
        let mut mock = MockLink::new();
        mock.expect(&[0x02, b'A', 0x03], &[0x11, b'X', 0x03]);

        mock.write_all(&[0x02, b'A', 0x03]).unwrap();

        assert_eq!(mock.read_byte().unwrap(), Some(0x11));
        assert_eq!(mock.read_byte().unwrap(), Some(b'X'));
        assert_eq!(mock.read_byte().unwrap(), Some(0x03));
        assert_eq!(mock.read_byte().unwrap(), None);
        assert_eq!(mock.remaining_expectations(), 0);
    }

    #[test]
    fn mock_link_unexpected_write_is_silent() {
        let mut mock = MockLink::new();
        mock.expect(&[0x01], &[0xFF]);

        mock.write_all(&[0x99]).unwrap();

        assert_eq!(mock.read_byte().unwrap(), None);
        assert_eq!(mock.remaining_expectations(), 1);
        assert_eq!(mock.sent_data(), vec![vec![0x99]]);
    }

    #[test]
    fn mock_link_standing_reply_answers_every_time() {
        let mut mock = MockLink::new();
        mock.respond(b"\x11000\x03", b"\x12OK\x03");
        mock.respond(b"\x0207A1A\x03", b"\x020026C8\x03");

        mock.write_all(b"\x0207A1A\x03").unwrap();
        mock.write_all(b"\x11000\x03").unwrap();
        mock.write_all(b"\x11000\x03").unwrap();

        let mut inbound = Vec::new();
        while let Some(b) = mock.read_byte().unwrap() {
            inbound.push(b);
        }
        assert_eq!(inbound, b"\x020026C8\x03\x12OK\x03\x12OK\x03".to_vec());
    }

    #[test]
    fn mock_link_ordered_expectation_wins_over_standing_reply() {
        let mut mock = MockLink::new();
        mock.respond(b"A", b"standing");
        mock.expect(b"A", b"first");

        mock.write_all(b"A").unwrap();
        mock.write_all(b"A").unwrap();

        let mut inbound = Vec::new();
        while let Some(b) = mock.read_byte().unwrap() {
            inbound.push(b);
        }
        assert_eq!(inbound, b"firststanding".to_vec());
        assert_eq!(mock.remaining_expectations(), 0);
    }

    #[test]
    fn mock_link_push_inbound() {
        let mut mock = MockLink::new();
        mock.push_inbound(b"ab");
        assert_eq!(mock.pending_inbound(), 2);
        assert_eq!(mock.read_byte().unwrap(), Some(b'a'));
        assert_eq!(mock.pending_inbound(), 1);
    }

    #[test]
    fn mock_link_clones_share_state() {
        let handle = MockLink::new();
        let mut owned = handle.clone();

        owned.write_all(b"x").unwrap();
        handle.push_inbound(b"y");

        assert_eq!(handle.sent_count(), 1);
        assert_eq!(owned.read_byte().unwrap(), Some(b'y'));
    }

    #[test]
    fn mock_link_disconnected() {
        let mut mock = MockLink::new();
        mock.set_connected(false);

        assert!(matches!(mock.read_byte(), Err(Error::NotConnected)));
        assert!(matches!(mock.write_all(b"x"), Err(Error::NotConnected)));
        assert_eq!(mock.sent_count(), 0);
    }
}
