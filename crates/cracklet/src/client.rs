//! Local collaborator surface: the typed API the UI shell drives.
//!
//! `connect`/`disconnect`/`submit_hash` mirror the request/response half of
//! the collaborator interface; push notifications flow back through the
//! [`EngineEvent`] channel returned by [`WorkerClient::new`]. Every
//! connection and job lifecycle step is surfaced there as a human-readable
//! status line, so a failed connect or a bad job degrades gracefully rather
//! than taking the worker down.

use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};

use crate::config::ClientConfig;
use crate::protocol::WorkerEvent;
use crate::scheduler::Scheduler;
use crate::session::{self, ConnectionState, CurrentSession, SessionHandle, SessionId};

/// Push notification to the external collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Status line, from this engine or relayed verbatim from the
    /// coordinator.
    ServerLog(String),
    /// The coordinator declared the overall hash cracked, possibly by
    /// another worker.
    HashComplete(String),
}

/// Worker-side client: owns the connection lifecycle and hands accepted jobs
/// to the scheduler.
pub struct WorkerClient {
    config: ClientConfig,
    current: CurrentSession,
    scheduler: Scheduler,
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl WorkerClient {
    /// Create a client plus the receiver the collaborator drains for push
    /// notifications.
    pub fn new(config: ClientConfig) -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let current = CurrentSession::default();
        let scheduler = Scheduler::new(current.clone());
        (
            Self {
                config,
                current,
                scheduler,
                events,
            },
            events_rx,
        )
    }

    pub fn state(&self) -> ConnectionState {
        self.current.state()
    }

    /// Connect to the coordinator and wait for its handshake ack.
    ///
    /// Returns false on an empty host (synchronously, no transport attempt),
    /// on a transport failure, and when no ack arrives before the configured
    /// timeout; the timeout counts as a failed connection attempt and leaves
    /// the state `Disconnected`. An existing session is torn down first.
    pub async fn connect(&self, host: &str) -> bool {
        self.log("Connecting to the coordinator...");
        if host.is_empty() {
            self.log("No host provided!");
            return false;
        }

        self.current.close();
        self.current.set_connecting();

        // One deadline covers the TCP connect and the handshake ack.
        let deadline = tokio::time::Instant::now() + self.config.connect_timeout;

        let stream = match tokio::time::timeout_at(deadline, TcpStream::connect(host)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                tracing::warn!(%host, error = %e, "TCP connect failed");
                self.log(format!("Could not reach the coordinator: {e}"));
                self.current.set_disconnected();
                return false;
            }
            Err(_) => {
                self.log("Connection to the coordinator timed out!");
                self.current.set_disconnected();
                return false;
            }
        };

        let id = SessionId::new();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (ack_tx, ack_rx) = oneshot::channel();
        let task = tokio::spawn(session::run_session(
            id,
            stream,
            outbound_rx,
            ack_tx,
            self.current.clone(),
            self.scheduler.clone(),
            self.events.clone(),
        ));

        match tokio::time::timeout_at(deadline, ack_rx).await {
            Ok(Ok(())) => {
                self.current
                    .install(SessionHandle::new(id, host.to_string(), outbound_tx));
                self.log("Connected to the coordinator!");
                true
            }
            // No ack before the deadline, or the session task died first.
            _ => {
                self.log("Connection to the coordinator timed out!");
                task.abort();
                self.current.set_disconnected();
                false
            }
        }
    }

    /// Gracefully close the active session. Always returns true; with no
    /// active session this is a no-op and no second forced-disconnect notice
    /// goes out.
    pub async fn disconnect(&self) -> bool {
        self.log("Disconnecting from the coordinator...");
        self.current.close();
        true
    }

    /// Forward an arbitrary payload to the coordinator as a `data` event.
    ///
    /// No payload validation happens here; that is the collaborator's
    /// responsibility. Succeeds iff a session is active.
    pub fn submit_hash(&self, payload: serde_json::Value) -> bool {
        self.log("Submitting hash...");
        self.current.send(WorkerEvent::Data { payload })
    }

    fn log(&self, message: impl Into<String>) {
        let _ = self.events.send(EngineEvent::ServerLog(message.into()));
    }
}
