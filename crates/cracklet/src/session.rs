//! Connection state machine and session event loop.
//!
//! Exactly one session exists at a time. The event loop task owns the
//! transport; everything else reaches the session through [`CurrentSession`],
//! a shared slot that is replaced wholesale on reconnect. Job results look
//! the session up at delivery time rather than capturing a handle at submit
//! time, so a result computed after disconnect is dropped instead of being
//! written to a dead transport.
//!
//! Event handling is single-threaded: one inbound event at a time, in the
//! order the transport delivered them. Long-running searches never run here
//! (see [`crate::scheduler`]), so liveness probes are always echoed promptly.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_util::codec::{FramedRead, FramedWrite};

use crate::client::EngineEvent;
use crate::codec::JsonCodec;
use crate::job::JobSpec;
use crate::protocol::{ServerEvent, WorkerEvent};
use crate::scheduler::Scheduler;

/// Unique identifier for one transport session.
///
/// A session's own teardown path must not clear a replacement session that a
/// later connect already installed; the id tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(uuid::Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connection lifecycle states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    /// Transport opening or handshake ack pending.
    Connecting,
    Connected,
    /// Graceful shutdown in progress.
    Closing,
}

/// Sender side of an established session.
pub(crate) struct SessionHandle {
    pub id: SessionId,
    pub endpoint: String,
    pub established_at: Instant,
    outbound: mpsc::UnboundedSender<WorkerEvent>,
}

impl SessionHandle {
    pub fn new(id: SessionId, endpoint: String, outbound: mpsc::UnboundedSender<WorkerEvent>) -> Self {
        Self {
            id,
            endpoint,
            established_at: Instant::now(),
            outbound,
        }
    }

    pub fn send(&self, event: WorkerEvent) -> bool {
        self.outbound.send(event).is_ok()
    }
}

#[derive(Default)]
struct Slot {
    state: ConnectionState,
    handle: Option<SessionHandle>,
}

/// Holder for "the current session, if any".
///
/// Readers always observe either the old or the new session, never a torn
/// mix: the slot is swapped under a write lock held only for the swap.
#[derive(Clone, Default)]
pub(crate) struct CurrentSession {
    slot: Arc<RwLock<Slot>>,
}

impl CurrentSession {
    fn read(&self) -> RwLockReadGuard<'_, Slot> {
        self.slot.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slot> {
        self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> ConnectionState {
        self.read().state
    }

    pub fn set_connecting(&self) {
        self.write().state = ConnectionState::Connecting;
    }

    pub fn set_disconnected(&self) {
        self.write().state = ConnectionState::Disconnected;
    }

    /// Install an established session, replacing none (connect tears the old
    /// one down first).
    pub fn install(&self, handle: SessionHandle) {
        let mut slot = self.write();
        tracing::info!(session_id = %handle.id, endpoint = %handle.endpoint, "Session established");
        slot.handle = Some(handle);
        slot.state = ConnectionState::Connected;
    }

    /// Gracefully close the active session, if any.
    ///
    /// Idempotent: with no active session this is a no-op and no
    /// forced-disconnect notice goes out. Returns whether a session was
    /// actually closed.
    pub fn close(&self) -> bool {
        let handle = {
            let mut slot = self.write();
            match slot.handle.take() {
                Some(handle) => {
                    slot.state = ConnectionState::Closing;
                    handle
                }
                None => {
                    slot.state = ConnectionState::Disconnected;
                    return false;
                }
            }
        };
        handle.send(WorkerEvent::ForceDisconnect);
        tracing::info!(
            session_id = %handle.id,
            uptime = ?handle.established_at.elapsed(),
            "Closing session"
        );
        // Dropping the handle closes the outbound channel; the event loop
        // flushes the notice and exits.
        drop(handle);
        self.write().state = ConnectionState::Disconnected;
        true
    }

    /// Teardown driven by the session task itself (peer disconnect, transport
    /// error). Ignored if a later connect already replaced the session.
    pub fn clear_if(&self, id: SessionId) {
        let mut slot = self.write();
        if slot.handle.as_ref().is_some_and(|handle| handle.id == id) {
            slot.handle = None;
            slot.state = ConnectionState::Disconnected;
        }
    }

    /// Deliver an event through the current session. False when no session
    /// is active; the caller decides whether that is worth more than a debug
    /// line.
    pub fn send(&self, event: WorkerEvent) -> bool {
        match &self.read().handle {
            Some(handle) => handle.send(event),
            None => false,
        }
    }
}

/// Run one session's event loop until the peer disconnects, the transport
/// fails, or the handle is dropped by a local disconnect.
pub(crate) async fn run_session(
    id: SessionId,
    stream: TcpStream,
    mut outbound_rx: mpsc::UnboundedReceiver<WorkerEvent>,
    ack_tx: oneshot::Sender<()>,
    current: CurrentSession,
    scheduler: Scheduler,
    events: mpsc::UnboundedSender<EngineEvent>,
) {
    let (read_half, write_half) = stream.into_split();
    let mut reader = FramedRead::new(read_half, JsonCodec::<ServerEvent>::new());
    let mut writer = FramedWrite::new(write_half, JsonCodec::<WorkerEvent>::new());
    // Consumed by the first handshake ack; the connect call also times out on
    // its own, and whichever outcome loses the race is ignored.
    let mut ack_tx = Some(ack_tx);

    loop {
        tokio::select! {
            inbound = reader.next() => {
                match inbound {
                    Some(Ok(ServerEvent::Connect)) => {
                        match ack_tx.take() {
                            Some(tx) => {
                                let _ = tx.send(());
                            }
                            None => {
                                tracing::warn!(session_id = %id, "Duplicate handshake ack ignored");
                            }
                        }
                    }
                    Some(Ok(ServerEvent::Lifecheck)) => {
                        // Echoed inline, ahead of any queued result, so the
                        // peer sees the probe answered in arrival order.
                        if let Err(e) = writer.send(WorkerEvent::Lifecheck).await {
                            tracing::error!(session_id = %id, error = %e, "Failed to echo lifecheck");
                            relay(&events, "Connection to the coordinator lost!");
                            break;
                        }
                    }
                    Some(Ok(ServerEvent::Log { message })) => {
                        let _ = events.send(EngineEvent::ServerLog(message));
                    }
                    Some(Ok(ServerEvent::Job(envelope))) => {
                        match JobSpec::from_envelope(envelope) {
                            Ok(job) => {
                                tracing::debug!(
                                    session_id = %id,
                                    job_id = %job.id(),
                                    strategy = job.strategy(),
                                    "Job accepted"
                                );
                                scheduler.submit(job);
                            }
                            Err(e) => {
                                // Contract violation by the peer: fatal to
                                // this job only, the session stays up.
                                tracing::error!(session_id = %id, error = %e, "Rejected job announcement");
                                relay(&events, format!("Rejected job from the coordinator: {e}"));
                            }
                        }
                    }
                    Some(Ok(ServerEvent::Disconnect)) => {
                        relay(&events, "Disconnected from the coordinator!");
                        break;
                    }
                    Some(Ok(ServerEvent::HashComplete { message })) => {
                        let _ = events.send(EngineEvent::HashComplete(message));
                    }
                    Some(Err(e)) => {
                        tracing::error!(session_id = %id, error = %e, "Transport error");
                        relay(&events, "Connection to the coordinator lost!");
                        break;
                    }
                    None => {
                        relay(&events, "Connection to the coordinator lost!");
                        break;
                    }
                }
            }

            outbound = outbound_rx.recv() => {
                match outbound {
                    Some(event) => {
                        if let Err(e) = writer.send(event).await {
                            tracing::error!(session_id = %id, error = %e, "Failed to send event");
                            relay(&events, "Connection to the coordinator lost!");
                            break;
                        }
                    }
                    // Handle dropped by a local disconnect; the
                    // forced-disconnect notice was already flushed above.
                    None => break,
                }
            }
        }
    }

    current.clear_if(id);
    tracing::debug!(session_id = %id, "Session event loop exiting");
}

fn relay(events: &mpsc::UnboundedSender<EngineEvent>, message: impl Into<String>) {
    let _ = events.send(EngineEvent::ServerLog(message.into()));
}
