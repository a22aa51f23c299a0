//! Job dispatch - routes a validated job to its search engine.

use std::time::Instant;

use crate::job::{JobResult, JobSpec};
use crate::search::{brute_force, wordlist};

/// Run the engine matching the job's variant and return its result
/// unchanged.
///
/// Unrecognized job types never reach this point; they are rejected when the
/// wire envelope is validated into a [`JobSpec`].
pub fn dispatch(job: &JobSpec) -> JobResult {
    let started = Instant::now();
    let result = match job {
        JobSpec::Wordlist(job) => wordlist::search(job),
        JobSpec::BruteForce(job) => brute_force::search(job),
    };
    tracing::info!(
        job_id = %job.id(),
        strategy = job.strategy(),
        outcome = ?result.kind,
        elapsed = ?started.elapsed(),
        "Job finished"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;
    use crate::job::{BruteForceJob, WordlistJob};
    use crate::protocol::MessageKind;

    #[test]
    fn routes_wordlist_jobs() {
        let job = JobSpec::Wordlist(WordlistJob {
            id: "job-1".to_string(),
            // md5("hunter2")
            target_hash: "2ab96390c7dbe3439de74d0c9b0b1767".to_string(),
            algorithm: HashAlgorithm::Md5,
            wordlist: vec!["hunter2".to_string()],
        });
        let result = dispatch(&job);
        assert_eq!(result.kind, MessageKind::Found);
        assert_eq!(result.word, "hunter2");
    }

    #[test]
    fn routes_bruteforce_jobs() {
        let job = JobSpec::BruteForce(BruteForceJob {
            id: "job-2".to_string(),
            // md5("ab")
            target_hash: "187ef4436122d1cc2f40dc2b92f0eba0".to_string(),
            algorithm: HashAlgorithm::Md5,
            charset: vec!['a', 'b'],
            min_length: 1,
            max_length: 2,
        });
        let result = dispatch(&job);
        assert_eq!(result.kind, MessageKind::Found);
        assert_eq!(result.word, "ab");
    }

    #[test]
    fn result_algorithm_echoes_job_algorithm() {
        let job = JobSpec::Wordlist(WordlistJob {
            id: "job-3".to_string(),
            target_hash: "0000000000000000000000000000000000000000".to_string(),
            algorithm: HashAlgorithm::Sha1,
            wordlist: vec!["nope".to_string()],
        });
        let result = dispatch(&job);
        assert_eq!(result.kind, MessageKind::Exhausted);
        assert_eq!(result.algorithm, HashAlgorithm::Sha1);
    }
}
