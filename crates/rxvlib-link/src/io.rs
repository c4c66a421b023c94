//! IO task that drives a [`LinkManager`] from a tokio runtime.
//!
//! The manager itself is a plain polled state machine. This module owns it
//! inside one spawned task which ticks [`LinkManager::process`] on a fixed
//! interval, forwards every delivered frame (or failure) over a channel, and
//! accepts commands from any number of callers.
//!
//! The manager holds a single outstanding command. Commands submitted while
//! it is busy wait in a FIFO inside the task and are handed over one at a
//! time as the manager frees up, so callers never see the busy rejection.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use rxvlib_core::clock::Clock;
use rxvlib_core::error::{Error, Result};
use rxvlib_core::link::Link;

use crate::manager::LinkManager;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A delivered frame, or `None` for a failed command or discarded frame.
pub type Delivery = Option<Vec<u8>>;

/// Configuration for the poller task.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Interval between `process()` calls.
    pub tick: Duration,
    /// Capacity of the command channel.
    pub queue_depth: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        PollerConfig {
            tick: Duration::from_millis(10),
            queue_depth: 32,
        }
    }
}

/// A request sent from callers to the poller task.
enum Request {
    /// Queue a raw command for transmission.
    Send(Vec<u8>),
    /// Abort the outstanding command.
    Abort,
}

/// Handle to the poller task.
pub struct PollerHandle<L, C> {
    tx: mpsc::Sender<Request>,
    cancel: CancellationToken,
    task: JoinHandle<LinkManager<L, C>>,
}

impl<L, C> PollerHandle<L, C> {
    /// Queue a raw command. Returns once the task has accepted it.
    pub async fn send(&self, cmd: Vec<u8>) -> Result<()> {
        self.tx
            .send(Request::Send(cmd))
            .await
            .map_err(|_| Error::NotConnected)
    }

    /// Abort the oldest command that has not been answered yet.
    ///
    /// That is the command the manager holds, or, when the manager is idle,
    /// the head of the queue. Either way the command is delivered as a
    /// single `None`; a command that never reached the wire is not sent.
    pub async fn abort(&self) -> Result<()> {
        self.tx
            .send(Request::Abort)
            .await
            .map_err(|_| Error::NotConnected)
    }

    /// Stop the task and recover the manager.
    ///
    /// Commands still waiting in the queue are dropped.
    pub async fn shutdown(self) -> Result<LinkManager<L, C>> {
        self.cancel.cancel();
        self.task
            .await
            .map_err(|e| Error::Link(format!("poller task failed: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Spawn
// ---------------------------------------------------------------------------

/// Spawn the poller task around `manager`.
///
/// Replaces any receive callback on the manager. Deliveries arrive on the
/// returned receiver in link order.
pub fn spawn_poller<L, C>(
    mut manager: LinkManager<L, C>,
    config: PollerConfig,
) -> (PollerHandle<L, C>, mpsc::UnboundedReceiver<Delivery>)
where
    L: Link + 'static,
    C: Clock + 'static,
{
    let (frame_tx, frame_rx) = mpsc::unbounded_channel();
    manager.on_recv(move |frame| {
        let _ = frame_tx.send(frame.map(<[u8]>::to_vec));
    });

    let (tx, rx) = mpsc::channel(config.queue_depth.max(1));
    let cancel = CancellationToken::new();
    let task = tokio::spawn(poll_loop(manager, rx, cancel.clone(), config.tick));

    (PollerHandle { tx, cancel, task }, frame_rx)
}

// ---------------------------------------------------------------------------
// Poll loop
// ---------------------------------------------------------------------------

async fn poll_loop<L: Link, C: Clock>(
    mut manager: LinkManager<L, C>,
    mut rx: mpsc::Receiver<Request>,
    cancel: CancellationToken,
    tick: Duration,
) -> LinkManager<L, C> {
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut pending: VecDeque<Vec<u8>> = VecDeque::new();

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!(dropped = pending.len(), "poller cancelled");
                break;
            }

            req = rx.recv() => match req {
                Some(Request::Send(cmd)) => pending.push_back(cmd),
                Some(Request::Abort) => {
                    if !manager.is_busy() {
                        if let Some(cmd) = pending.pop_front() {
                            manager.send(&cmd);
                        }
                    }
                    manager.abort();
                }
                None => {
                    debug!("command channel closed, exiting poller");
                    break;
                }
            },

            _ = interval.tick() => {
                if !manager.is_busy() {
                    if let Some(cmd) = pending.pop_front() {
                        manager.send(&cmd);
                    }
                }
                if let Err(e) = manager.process() {
                    warn!(error = %e, "link processing failed");
                }
            }
        }
    }

    manager
}

#[cfg(test)]
mod tests {
    use rxvlib_core::clock::SystemClock;
    use rxvlib_test_harness::{ManualClock, MockLink};

    use super::*;

    fn fast() -> PollerConfig {
        PollerConfig {
            tick: Duration::from_millis(1),
            ..PollerConfig::default()
        }
    }

    async fn next(rx: &mut mpsc::UnboundedReceiver<Delivery>) -> Delivery {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("delivery timed out")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn command_response_through_poller() {
        let link = MockLink::new();
        link.expect(b"\x0207A1A\x03", b"\x020026C8\x03");
        let manager = LinkManager::new(link.clone(), ManualClock::new(0));

        let (handle, mut frames) = spawn_poller(manager, fast());
        handle.send(b"\x0207A1A\x03".to_vec()).await.unwrap();

        assert_eq!(next(&mut frames).await, Some(b"\x020026C8\x03".to_vec()));
        let manager = handle.shutdown().await.unwrap();
        assert!(!manager.is_busy());
        assert_eq!(link.sent_count(), 1);
    }

    #[tokio::test]
    async fn queued_commands_go_out_in_order() {
        let link = MockLink::new();
        link.expect(b"\x0207A1A\x03", b"\x020026C8\x03");
        link.expect(b"\x0207A1B\x03", b"\x020026C7\x03");
        // The second command waits for the quiet window after the first
        // reply, so time has to move.
        let manager = LinkManager::new(link.clone(), SystemClock::new());

        let (handle, mut frames) = spawn_poller(manager, fast());
        handle.send(b"\x0207A1A\x03".to_vec()).await.unwrap();
        handle.send(b"\x0207A1B\x03".to_vec()).await.unwrap();

        assert_eq!(next(&mut frames).await, Some(b"\x020026C8\x03".to_vec()));
        assert_eq!(next(&mut frames).await, Some(b"\x020026C7\x03".to_vec()));
        handle.shutdown().await.unwrap();
        assert_eq!(
            link.sent_data(),
            vec![b"\x0207A1A\x03".to_vec(), b"\x0207A1B\x03".to_vec()]
        );
    }

    #[tokio::test]
    async fn abort_reports_failure() {
        let link = MockLink::new();
        let clock = ManualClock::new(0);
        let manager = LinkManager::new(link.clone(), clock.clone());

        let (handle, mut frames) = spawn_poller(manager, fast());
        handle.send(b"\x11000\x03".to_vec()).await.unwrap();
        while link.sent_count() == 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        handle.abort().await.unwrap();
        clock.advance(crate::protocol::TIMEOUT_MS + 1);

        assert_eq!(next(&mut frames).await, None);
        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn abort_drops_a_queued_command_unsent() {
        let link = MockLink::new();
        let manager = LinkManager::new(link.clone(), ManualClock::new(0));

        let (handle, mut frames) = spawn_poller(manager, fast());
        handle.send(b"\x11000\x03".to_vec()).await.unwrap();
        handle.abort().await.unwrap();

        assert_eq!(next(&mut frames).await, None);
        let manager = handle.shutdown().await.unwrap();
        assert!(!manager.is_busy());
        assert_eq!(link.sent_count(), 0);
    }

    #[tokio::test]
    async fn unsolicited_frames_are_forwarded() {
        let link = MockLink::new();
        let manager = LinkManager::new(link.clone(), ManualClock::new(0));
        let (handle, mut frames) = spawn_poller(manager, fast());

        link.push_inbound(b"\x1102Main    \x03");
        assert_eq!(next(&mut frames).await, Some(b"\x1102Main    \x03".to_vec()));
        handle.shutdown().await.unwrap();
    }
}
