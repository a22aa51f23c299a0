//! Fire-and-forget job execution.
//!
//! Search is CPU-bound and can run for minutes, so it goes to the blocking
//! thread pool; the session event loop keeps echoing liveness probes and
//! accepting further jobs in the meantime. There is no cancellation and no
//! concurrency limit: once submitted, a job runs to completion even if the
//! session closes underneath it, in which case the result is dropped and the
//! coordinator re-issues the job elsewhere.

use crate::dispatch::dispatch;
use crate::job::JobSpec;
use crate::protocol::{ResultMessage, WorkerEvent};
use crate::session::CurrentSession;

#[derive(Clone)]
pub struct Scheduler {
    current: CurrentSession,
}

impl Scheduler {
    pub(crate) fn new(current: CurrentSession) -> Self {
        Self { current }
    }

    /// Start executing a job without waiting for it.
    ///
    /// The result is delivered through whatever session is current when the
    /// search finishes, which may differ from the session that accepted the
    /// job. With no session active it is discarded, not buffered.
    pub fn submit(&self, job: JobSpec) {
        let current = self.current.clone();
        tokio::spawn(async move {
            let job_id = job.id().to_string();
            let result = match tokio::task::spawn_blocking(move || dispatch(&job)).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(%job_id, error = %e, "Search task panicked");
                    return;
                }
            };

            let message = ResultMessage::from(result);
            if !current.send(WorkerEvent::data(&message)) {
                tracing::debug!(%job_id, "No active session, dropping result");
            }
        });
    }
}
