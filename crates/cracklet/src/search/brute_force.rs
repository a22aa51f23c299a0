//! Exhaustive search over all strings drawn from a charset.

use crate::job::{BruteForceJob, JobResult};

use super::scan;

/// Lazy odometer over charset digits.
///
/// Yields every string over `charset` with length in `[min_length,
/// max_length]`, in increasing-length order, lexicographic within a length
/// in the charset's given character order. The rightmost digit rolls
/// fastest. Nothing is materialized; the space is exponential in length.
pub struct Candidates {
    charset: Vec<char>,
    /// Digit indices of the current candidate; its len is the current length.
    indices: Vec<usize>,
    max_length: usize,
    /// Current candidate not yet yielded.
    fresh: bool,
    exhausted: bool,
}

impl Candidates {
    pub fn new(charset: &[char], min_length: usize, max_length: usize) -> Self {
        // Degenerate bounds terminate immediately instead of panicking on an
        // unindexable charset. Validation rejects these before search.
        let exhausted = min_length > max_length || (charset.is_empty() && min_length > 0);
        Self {
            charset: charset.to_vec(),
            indices: vec![0; min_length],
            max_length,
            fresh: true,
            exhausted,
        }
    }

    fn current(&self) -> String {
        self.indices.iter().map(|&i| self.charset[i]).collect()
    }

    /// Step the odometer; false when the whole space has been covered.
    fn advance(&mut self) -> bool {
        for digit in self.indices.iter_mut().rev() {
            *digit += 1;
            if *digit < self.charset.len() {
                return true;
            }
            *digit = 0;
        }
        // every digit rolled over, grow to the next length
        if self.indices.len() >= self.max_length || self.charset.is_empty() {
            return false;
        }
        self.indices = vec![0; self.indices.len() + 1];
        true
    }
}

impl Iterator for Candidates {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        if self.fresh {
            self.fresh = false;
            return Some(self.current());
        }
        if !self.advance() {
            self.exhausted = true;
            return None;
        }
        Some(self.current())
    }
}

/// Enumerate the candidate space against the target hash, stopping at the
/// first match.
pub fn search(job: &BruteForceJob) -> JobResult {
    tracing::debug!(
        job_id = %job.id,
        charset_len = job.charset.len(),
        min_length = job.min_length,
        max_length = job.max_length,
        algorithm = %job.algorithm,
        "Starting brute-force search"
    );

    let candidates = Candidates::new(&job.charset, job.min_length, job.max_length);
    match scan(job.algorithm, &job.target_hash, candidates) {
        Some(word) => JobResult::found(job.algorithm, word),
        None => JobResult::exhausted(job.algorithm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;
    use crate::protocol::MessageKind;

    fn collect(charset: &str, min: usize, max: usize) -> Vec<String> {
        let charset: Vec<char> = charset.chars().collect();
        Candidates::new(&charset, min, max).collect()
    }

    #[test]
    fn enumerates_in_length_then_lexicographic_order() {
        assert_eq!(
            collect("ab", 0, 2),
            vec!["", "a", "b", "aa", "ab", "ba", "bb"]
        );
    }

    #[test]
    fn respects_charset_order_not_code_point_order() {
        assert_eq!(collect("ba", 1, 1), vec!["b", "a"]);
    }

    #[test]
    fn all_shorter_candidates_come_before_any_longer_one() {
        let words = collect("xyz", 1, 3);
        let lengths: Vec<usize> = words.iter().map(|w| w.chars().count()).collect();
        assert!(lengths.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(words.len(), 3 + 9 + 27);
    }

    #[test]
    fn zero_length_bounds_yield_only_the_empty_string() {
        assert_eq!(collect("abc", 0, 0), vec![""]);
    }

    #[test]
    fn empty_charset_terminates() {
        assert_eq!(collect("", 0, 3), vec![""]);
        assert!(collect("", 2, 3).is_empty());
    }

    #[test]
    fn inverted_bounds_terminate() {
        assert!(collect("ab", 3, 1).is_empty());
    }

    fn job(charset: &str, min: usize, max: usize, target_hash: &str) -> BruteForceJob {
        BruteForceJob {
            id: "job-2".to_string(),
            target_hash: target_hash.to_string(),
            algorithm: HashAlgorithm::Md5,
            charset: charset.chars().collect(),
            min_length: min,
            max_length: max,
        }
    }

    #[test]
    fn finds_planted_match() {
        // md5("ab")
        let result = search(&job("ab", 0, 2, "187ef4436122d1cc2f40dc2b92f0eba0"));
        assert_eq!(result.kind, MessageKind::Found);
        assert_eq!(result.word, "ab");
    }

    #[test]
    fn full_space_without_match_is_exhausted() {
        let result = search(&job("ab", 1, 3, "2ab96390c7dbe3439de74d0c9b0b1767"));
        assert_eq!(result.kind, MessageKind::Exhausted);
        assert_eq!(result.word, "");
    }

    #[test]
    fn zero_length_space_is_exhausted_without_looping() {
        let result = search(&job("ab", 0, 0, "2ab96390c7dbe3439de74d0c9b0b1767"));
        assert_eq!(result.kind, MessageKind::Exhausted);
    }
}
