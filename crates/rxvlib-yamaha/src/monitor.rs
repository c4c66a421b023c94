//! Translate link deliveries into [`RxvEvent`]s.
//!
//! The link manager hands over raw frames (or `None` on failure). A
//! [`Monitor`] decodes each one with its [`RxV1600`] codec, which keeps the
//! status cache current, and broadcasts the result to every subscriber.
//!
//! Reports that arrive guarded are still cached and broadcast; the guard is
//! carried on the event so subscribers can hold back commands for that
//! function.

use tokio::sync::broadcast;
use tracing::{debug, warn};

use rxvlib_core::RxvEvent;

use crate::codec::{Response, RxV1600};

/// Default capacity of the event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Decodes deliveries and broadcasts events.
#[derive(Debug)]
pub struct Monitor {
    codec: RxV1600,
    event_tx: broadcast::Sender<RxvEvent>,
}

impl Monitor {
    /// Create a monitor with a fresh codec.
    pub fn new() -> Self {
        Self::with_codec(RxV1600::new(), DEFAULT_EVENT_CAPACITY)
    }

    /// Create a monitor around an existing codec.
    pub fn with_codec(codec: RxV1600, capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity.max(1));
        Monitor { codec, event_tx }
    }

    /// Subscribe to decoded events.
    pub fn subscribe(&self) -> broadcast::Receiver<RxvEvent> {
        self.event_tx.subscribe()
    }

    /// The codec and its status cache.
    pub fn codec(&self) -> &RxV1600 {
        &self.codec
    }

    /// Mutable access to the codec.
    pub fn codec_mut(&mut self) -> &mut RxV1600 {
        &mut self.codec
    }

    /// Decode one delivery, broadcast the resulting event, and return it.
    pub fn handle(&mut self, delivery: Option<&[u8]>) -> RxvEvent {
        let event = match delivery {
            None => {
                warn!("receiver did not answer");
                RxvEvent::Timeout
            }
            Some(frame) => self.translate(frame),
        };

        // No subscribers is not an error.
        let _ = self.event_tx.send(event.clone());
        event
    }

    fn translate(&mut self, frame: &[u8]) -> RxvEvent {
        match self.codec.decode_response(frame) {
            Response::Report(report) => {
                let name = self.codec.report_name(report.id);
                if report.guard.is_guarded() {
                    warn!(
                        id = report.id,
                        name = name.unwrap_or("?"),
                        guard = %report.guard,
                        "report is guarded"
                    );
                }
                RxvEvent::ReportChanged {
                    id: report.id,
                    name,
                    value: report.value,
                    text: self
                        .codec
                        .report_value_string(report.id)
                        .map(|s| s.into_owned()),
                    origin: report.origin,
                    guard: report.guard,
                }
            }
            Response::Text(text) => RxvEvent::DisplayText {
                id: text.id,
                name: self.codec.display_name(text.id),
                text: text.text().into_owned(),
            },
            Response::Config(dump) => {
                debug!(power = dump.power, "configuration received");
                RxvEvent::ConfigReceived { power: dump.power }
            }
            Response::Unrecognized => RxvEvent::Unrecognized {
                frame: frame.to_vec(),
            },
        }
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rxvlib_core::{Guard, Origin};
    use rxvlib_link::LinkManager;
    use rxvlib_test_harness::{ManualClock, MockLink};

    use super::*;
    use crate::commands::command;
    use crate::protocol::tests::config_frame;

    #[test]
    fn report_event() {
        let mut monitor = Monitor::new();
        let mut rx = monitor.subscribe();

        let event = monitor.handle(Some(b"\x021026C7\x03"));
        let expected = RxvEvent::ReportChanged {
            id: 0x26,
            name: Some("MainVolume"),
            value: 0xC7,
            text: Some("0 dB".to_string()),
            origin: Origin::Ir,
            guard: Guard::None,
        };
        assert_eq!(event, expected);
        assert_eq!(rx.try_recv().unwrap(), expected);
        assert_eq!(monitor.codec().report_value(0x26), 0xC7);
    }

    #[test]
    fn guarded_report_is_still_cached() {
        let mut monitor = Monitor::new();
        let event = monitor.handle(Some(b"\x02322001\x03"));
        assert!(matches!(
            event,
            RxvEvent::ReportChanged {
                guard: Guard::Settings,
                origin: Origin::System,
                ..
            }
        ));
        assert_eq!(monitor.codec().report_value(0x20), 0x01);
    }

    #[test]
    fn text_config_timeout_and_garbage() {
        let mut monitor = Monitor::new();

        assert_eq!(
            monitor.handle(Some(b"\x1100 87.50MH\x03")),
            RxvEvent::DisplayText {
                id: 0,
                name: Some("TunerFrequency"),
                text: " 87.50MH".to_string(),
            }
        );
        assert_eq!(
            monitor.handle(Some(&config_frame(0x0A, b"021"))),
            RxvEvent::ConfigReceived { power: false }
        );
        assert_eq!(monitor.handle(None), RxvEvent::Timeout);
        assert_eq!(
            monitor.handle(Some(b"\x13\x7F\x03")),
            RxvEvent::Unrecognized {
                frame: b"\x13\x7F\x03".to_vec()
            }
        );
    }

    #[test]
    fn no_subscribers_is_fine() {
        let mut monitor = Monitor::new();
        monitor.handle(Some(b"\x02002300\x03"));
        assert_eq!(monitor.codec().report_value_string(0x23).as_deref(), Some("Off"));
    }

    /// Link manager and codec wired together over a scripted receiver.
    #[test]
    fn end_to_end_over_link() {
        let link = MockLink::new();
        let clock = ManualClock::new(0);
        let ready = command("Ready").unwrap();
        link.expect(ready, &config_frame(0x0A, b"002"));

        let monitor = Arc::new(Mutex::new(Monitor::new()));
        let mut rx = monitor.lock().unwrap().subscribe();
        let mut manager = LinkManager::new(link.clone(), clock.clone());
        let sink = Arc::clone(&monitor);
        manager.on_recv(move |frame| {
            sink.lock().unwrap().handle(frame);
        });

        assert!(manager.send(ready));
        manager.process().unwrap();
        clock.advance(10);
        manager.process().unwrap();
        assert_eq!(rx.try_recv().unwrap(), RxvEvent::ConfigReceived { power: false });

        link.push_inbound(b"\x02002001\x03");
        manager.process().unwrap();
        assert!(matches!(
            rx.try_recv().unwrap(),
            RxvEvent::ReportChanged { id: 0x20, value: 0x01, .. }
        ));

        let codec = monitor.lock().unwrap().codec().clone();
        assert_eq!(codec.report_value_string(0x20).as_deref(), Some("All On"));
        assert_eq!(codec.report_value_string(0x21).as_deref(), Some("Tuner"));
    }
}
