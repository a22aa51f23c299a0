//! cracklet: connection and job execution engine for a distributed
//! hash-recovery worker.

mod client;
pub mod codec;
mod config;
pub mod dispatch;
mod hash;
mod job;
pub mod protocol;
mod scheduler;
pub mod search;
mod session;

pub use client::{EngineEvent, WorkerClient};
pub use config::ClientConfig;
pub use dispatch::dispatch;
pub use hash::HashAlgorithm;
pub use job::{
    BruteForceJob, JobEnvelope, JobError, JobInformation, JobResult, JobSpec, WordlistJob,
};
pub use protocol::{MessageKind, ResultMessage, ServerEvent, WorkerEvent};
pub use scheduler::Scheduler;
pub use session::{ConnectionState, SessionId};

pub const CRACKLET_VERSION: &str = env!("CARGO_PKG_VERSION");
