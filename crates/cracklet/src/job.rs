//! Job specifications assigned by the coordinator.
//!
//! A job arrives as a loose JSON envelope (`{"jobInformation": {"type": ..},
//! ..}`) and is validated into a closed [`JobSpec`] before any search work
//! starts. The discriminant is checked exactly once, here; the engines only
//! ever see a well-formed variant.

use serde::{Deserialize, Serialize};

use crate::hash::HashAlgorithm;
use crate::protocol::MessageKind;

/// Discriminant and identity of a job announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInformation {
    pub id: String,
    #[serde(rename = "type")]
    pub job_type: String,
}

/// Raw wire shape of a job announcement.
///
/// Fields of the inactive variant are simply absent; [`JobSpec::from_envelope`]
/// checks that the active variant's fields are all present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEnvelope {
    pub job_information: JobInformation,
    pub target_hash: String,
    pub hash_algorithm: HashAlgorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wordlist: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// A malformed or unsatisfiable job announcement.
///
/// Fatal to the job only, never to the session: the dispatcher surfaces the
/// error and the coordinator is expected to re-issue a corrected job.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobError {
    #[error("job {id}: unknown job type {job_type:?}")]
    UnknownType { id: String, job_type: String },

    #[error("job {id}: missing field {field:?} for {job_type} job")]
    MissingField {
        id: String,
        job_type: &'static str,
        field: &'static str,
    },

    #[error("job {id}: empty target hash")]
    EmptyTargetHash { id: String },

    #[error("job {id}: minLength {min} exceeds maxLength {max}")]
    InvalidLengthBounds { id: String, min: usize, max: usize },

    #[error("job {id}: empty charset with maxLength {max}")]
    EmptyCharset { id: String, max: usize },
}

/// Dictionary-attack job: try each candidate from a fixed list, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordlistJob {
    pub id: String,
    pub target_hash: String,
    pub algorithm: HashAlgorithm,
    pub wordlist: Vec<String>,
}

/// Exhaustive-attack job: enumerate all strings over `charset` with length
/// in `[min_length, max_length]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BruteForceJob {
    pub id: String,
    pub target_hash: String,
    pub algorithm: HashAlgorithm,
    /// Alphabet in its given order; enumeration order follows it.
    pub charset: Vec<char>,
    pub min_length: usize,
    pub max_length: usize,
}

/// A validated unit of cracking work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSpec {
    Wordlist(WordlistJob),
    BruteForce(BruteForceJob),
}

impl JobSpec {
    /// Validate a wire envelope into a job spec.
    ///
    /// The target hash is normalized to lowercase here so the engines can
    /// compare digests byte-for-byte.
    pub fn from_envelope(envelope: JobEnvelope) -> Result<Self, JobError> {
        let id = envelope.job_information.id;
        let job_type = envelope.job_information.job_type;

        if envelope.target_hash.is_empty() {
            return Err(JobError::EmptyTargetHash { id });
        }
        let target_hash = envelope.target_hash.to_ascii_lowercase();

        match job_type.as_str() {
            "wordlist" => {
                let wordlist = envelope.wordlist.ok_or_else(|| JobError::MissingField {
                    id: id.clone(),
                    job_type: "wordlist",
                    field: "wordlist",
                })?;
                Ok(Self::Wordlist(WordlistJob {
                    id,
                    target_hash,
                    algorithm: envelope.hash_algorithm,
                    wordlist,
                }))
            }
            "bruteforce" => {
                let missing = |field| JobError::MissingField {
                    id: id.clone(),
                    job_type: "bruteforce",
                    field,
                };
                let charset = envelope.charset.ok_or_else(|| missing("charset"))?;
                let min_length = envelope.min_length.ok_or_else(|| missing("minLength"))?;
                let max_length = envelope.max_length.ok_or_else(|| missing("maxLength"))?;

                if min_length > max_length {
                    return Err(JobError::InvalidLengthBounds {
                        id,
                        min: min_length,
                        max: max_length,
                    });
                }
                let charset: Vec<char> = charset.chars().collect();
                if charset.is_empty() && max_length > 0 {
                    return Err(JobError::EmptyCharset {
                        id,
                        max: max_length,
                    });
                }
                Ok(Self::BruteForce(BruteForceJob {
                    id,
                    target_hash,
                    algorithm: envelope.hash_algorithm,
                    charset,
                    min_length,
                    max_length,
                }))
            }
            _ => Err(JobError::UnknownType { id, job_type }),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Wordlist(job) => &job.id,
            Self::BruteForce(job) => &job.id,
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Wordlist(job) => job.algorithm,
            Self::BruteForce(job) => job.algorithm,
        }
    }

    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Wordlist(_) => "wordlist",
            Self::BruteForce(_) => "bruteforce",
        }
    }
}

/// Outcome of executing a job: a recovered plaintext or exhaustion.
///
/// Produced only by a search engine on completion; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobResult {
    pub kind: MessageKind,
    pub algorithm: HashAlgorithm,
    /// Matching plaintext, empty on exhaustion.
    pub word: String,
}

impl JobResult {
    pub fn found(algorithm: HashAlgorithm, word: String) -> Self {
        Self {
            kind: MessageKind::Found,
            algorithm,
            word,
        }
    }

    pub fn exhausted(algorithm: HashAlgorithm) -> Self {
        Self {
            kind: MessageKind::Exhausted,
            algorithm,
            word: String::new(),
        }
    }
}
