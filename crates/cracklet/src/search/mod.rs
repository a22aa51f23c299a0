//! Search engines: pure functions from a validated job to a [`JobResult`].
//!
//! Both engines are CPU-bound and long-running; the scheduler keeps them off
//! the session event loop so liveness probes keep getting echoed while a
//! search runs.

pub mod brute_force;
pub mod wordlist;

use crate::hash::HashAlgorithm;

/// Scan candidates in order; the first match is authoritative and scanning
/// stops there, so no candidate past a match is ever hashed.
pub(crate) fn scan<I>(algorithm: HashAlgorithm, target_hash: &str, candidates: I) -> Option<String>
where
    I: IntoIterator,
    I::Item: AsRef<str> + Into<String>,
{
    for candidate in candidates {
        if algorithm.digest_hex(candidate.as_ref()) == target_hash {
            return Some(candidate.into());
        }
    }
    None
}
