//! Dictionary search over an ordered candidate list.

use crate::job::{JobResult, WordlistJob};

use super::scan;

/// Try each candidate in list order against the target hash.
///
/// Ordering is significant: the first match in sequence order is returned
/// and nothing past it is hashed, which keeps results deterministic for a
/// fixed wordlist and bounds worst-case work.
pub fn search(job: &WordlistJob) -> JobResult {
    tracing::debug!(
        job_id = %job.id,
        candidates = job.wordlist.len(),
        algorithm = %job.algorithm,
        "Starting wordlist search"
    );

    match scan(
        job.algorithm,
        &job.target_hash,
        job.wordlist.iter().map(String::as_str),
    ) {
        Some(word) => JobResult::found(job.algorithm, word),
        None => JobResult::exhausted(job.algorithm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;
    use crate::protocol::MessageKind;

    fn job(wordlist: &[&str]) -> WordlistJob {
        WordlistJob {
            id: "job-1".to_string(),
            // md5("hunter2")
            target_hash: "2ab96390c7dbe3439de74d0c9b0b1767".to_string(),
            algorithm: HashAlgorithm::Md5,
            wordlist: wordlist.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn finds_planted_candidate() {
        let result = search(&job(&["password", "hunter2", "qwerty"]));
        assert_eq!(result.kind, MessageKind::Found);
        assert_eq!(result.word, "hunter2");
        assert_eq!(result.algorithm, HashAlgorithm::Md5);
    }

    #[test]
    fn misses_are_exhausted_with_empty_word() {
        let result = search(&job(&["password", "qwerty"]));
        assert_eq!(result.kind, MessageKind::Exhausted);
        assert_eq!(result.word, "");
    }

    #[test]
    fn empty_wordlist_is_exhausted() {
        let result = search(&job(&[]));
        assert_eq!(result.kind, MessageKind::Exhausted);
    }

    #[test]
    fn finds_match_under_sha256() {
        let mut job = job(&["wrong", "secret"]);
        job.algorithm = HashAlgorithm::Sha256;
        // sha256("secret")
        job.target_hash =
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b".to_string();
        let result = search(&job);
        assert_eq!(result.kind, MessageKind::Found);
        assert_eq!(result.word, "secret");
    }
}
