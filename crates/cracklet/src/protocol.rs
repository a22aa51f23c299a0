//! Wire protocol types for worker-coordinator communication.
//!
//! The coordinator pushes events at the worker (`ServerEvent`); the worker
//! answers with `WorkerEvent`. Both sides exchange JSON frames tagged with
//! an `event` field, framed by [`crate::codec::JsonCodec`].

use serde::{Deserialize, Serialize};

use crate::hash::HashAlgorithm;
use crate::job::{JobEnvelope, JobResult};

/// Outcome kind reported to the coordinator when a job completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// The target plaintext was recovered.
    Found,
    /// The whole search space was covered with no match.
    Exhausted,
}

/// Result payload sent to the coordinator on job completion.
///
/// Built deterministically from a [`JobResult`]; construction is total, there
/// is no failure mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMessage {
    pub message_type: MessageKind,
    pub algorithm: HashAlgorithm,
    /// Recovered plaintext, empty on exhaustion.
    pub word: String,
}

impl ResultMessage {
    pub fn new(message_type: MessageKind, algorithm: HashAlgorithm, word: impl Into<String>) -> Self {
        Self {
            message_type,
            algorithm,
            word: word.into(),
        }
    }
}

impl From<JobResult> for ResultMessage {
    fn from(result: JobResult) -> Self {
        Self {
            message_type: result.kind,
            algorithm: result.algorithm,
            word: result.word,
        }
    }
}

/// Events pushed by the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Handshake acknowledgement; must arrive before the connect timeout.
    Connect,

    /// Human-readable status line, relayed verbatim to the collaborator.
    Log { message: String },

    /// Coordinator-initiated disconnect.
    Disconnect,

    /// Liveness probe; the worker must echo it immediately.
    Lifecheck,

    /// Job announcement. Parsed into a [`crate::job::JobSpec`] at dispatch.
    Job(JobEnvelope),

    /// The overall hash was cracked, possibly by another worker.
    #[serde(rename = "hash-complete")]
    HashComplete { message: String },
}

/// Events emitted by the worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum WorkerEvent {
    /// Arbitrary data payload, normally a [`ResultMessage`].
    Data { payload: serde_json::Value },

    /// Echo of a liveness probe, no payload.
    Lifecheck,

    /// Notice sent before the worker closes the transport itself.
    ForceDisconnect,
}

impl WorkerEvent {
    /// Wrap a result message as a `data` event.
    pub fn data(message: &ResultMessage) -> Self {
        // ResultMessage contains only plain enums and a string, so
        // serialization cannot fail.
        Self::Data {
            payload: serde_json::to_value(message).unwrap_or(serde_json::Value::Null),
        }
    }
}
