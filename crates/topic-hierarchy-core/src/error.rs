//! Error types for topic-hierarchy-core.
//!
//! Each pipeline concern has its own error enum, unified under
//! [`HierarchyError`] so callers can decide per class whether a failure is
//! tolerable:
//!
//! - [`ConfigError`]: invalid specification, rejected before any work starts
//! - [`SimilarityError`]: matrix construction and shape problems
//! - [`MergeError`]: cross-tier document congruence failures
//! - [`InputError`]: malformed tier input files
//! - [`ExportError`]: per-artifact write failures
//!
//! Degenerate similarity rows are deliberately *not* an error: they are
//! flagged on the assignment output and logged as warnings.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, HierarchyError>;

/// Configuration problems, all fatal before assignment work begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `maxAssign` must be at least 1.
    #[error("invalid maxAssign: {got} (must be >= 1)")]
    InvalidMaxAssign {
        /// Value found in the specification.
        got: usize,
    },

    /// A declared topic count disagrees with the data it describes.
    #[error("topic count mismatch for {what}: declared {declared}, found {found}")]
    TopicCountMismatch {
        /// Which structure disagreed (e.g. "main tier store").
        what: &'static str,
        /// Count declared in the specification.
        declared: usize,
        /// Count actually found.
        found: usize,
    },

    /// A declared topic count of zero is meaningless.
    #[error("invalid topic count for {what}: must be >= 1")]
    InvalidTopicCount {
        /// Which tier declared it.
        what: &'static str,
    },

    /// Could not read the specification file.
    #[error("failed to read spec file {path}: {source}")]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Could not parse the specification file.
    #[error("failed to parse spec file {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Similarity matrix construction failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimilarityError {
    /// No rows provided.
    #[error("empty similarity matrix")]
    EmptyMatrix,

    /// A row's length disagrees with the first row.
    #[error("ragged similarity row {row}: expected {expected} columns, found {found}")]
    RaggedRow {
        /// Offending row index.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count found.
        found: usize,
    },

    /// Word-weight vectors of the two tiers have different vocabulary sizes.
    #[error("word weight dimension mismatch: main tier {main_dim}, sub tier {sub_dim}")]
    DimensionMismatch {
        /// Vocabulary dimension of the main tier.
        main_dim: usize,
        /// Vocabulary dimension of the sub tier.
        sub_dim: usize,
    },

    /// A topic carries no word weights, so no similarity can be computed.
    #[error("topic {topic} in the {tier} tier has no word weights")]
    MissingWordWeights {
        /// Tier name ("main" or "sub").
        tier: &'static str,
        /// Offending topic id.
        topic: usize,
    },

    /// A topic's word-weight length disagrees with the rest of its tier.
    #[error("topic {topic} in the {tier} tier has {found} word weights, expected {expected}")]
    RaggedWordWeights {
        /// Tier name ("main" or "sub").
        tier: &'static str,
        /// Offending topic id.
        topic: usize,
        /// Length of the tier's first topic.
        expected: usize,
        /// Length found.
        found: usize,
    },
}

/// Cross-tier document congruence failures during merge.
///
/// The two tiers are required to have been trained on the same document id
/// universe; a hole is a hard error, never a silent drop.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MergeError {
    /// Document ids present in the main tier but absent from the sub tier.
    #[error("documents missing from sub tier: {}", ids.join(", "))]
    MissingDocuments {
        /// Every offending id, sorted.
        ids: Vec<String>,
    },
}

/// Malformed tier input data.
#[derive(Debug, Error)]
pub enum InputError {
    /// Could not read a tier input file.
    #[error("failed to read tier file {path}: {source}")]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Could not parse a tier input file.
    #[error("failed to parse tier file {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A document's distribution length disagrees with the tier's topic count.
    #[error("document {doc_id}: distribution length {found}, expected {expected}")]
    DistributionLength {
        /// Offending document id.
        doc_id: String,
        /// Declared topic count.
        expected: usize,
        /// Length found.
        found: usize,
    },

    /// A sub-tier diagnostic vector appeared without its main-tier
    /// prerequisite.
    #[error("document {doc_id}: {field} present without its main-tier counterpart")]
    OrphanDiagnostic {
        /// Offending document id.
        doc_id: String,
        /// Name of the orphaned field.
        field: &'static str,
    },

    /// Duplicate document id within one tier.
    #[error("duplicate document id {doc_id} in tier input")]
    DuplicateDocument {
        /// Offending document id.
        doc_id: String,
    },

    /// Topic records are not a dense 0-based id sequence.
    #[error("topic ids are not contiguous from 0: found id {found} at position {position}")]
    NonContiguousTopics {
        /// Id found.
        found: usize,
        /// Position in the array.
        position: usize,
    },
}

/// A single artifact failed to write.
///
/// Exports are independent, not transactional: one failure does not abort
/// sibling exports, but the pipeline run is reported as failed.
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO failure while writing an artifact.
    #[error("failed to write {artifact} to {path}: {source}")]
    Io {
        /// Human-readable artifact name (e.g. "similarity matrix").
        artifact: &'static str,
        /// Destination path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Serialization failure while writing an artifact.
    #[error("failed to serialize {artifact}: {source}")]
    Serialize {
        /// Human-readable artifact name.
        artifact: &'static str,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl ExportError {
    /// Human-readable artifact name, for failure reporting.
    pub fn artifact(&self) -> &'static str {
        match self {
            ExportError::Io { artifact, .. } => artifact,
            ExportError::Serialize { artifact, .. } => artifact,
        }
    }
}

/// Top-level unified error for the reconciliation engine.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// Configuration error, rejected before assignment work begins.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Similarity matrix error.
    #[error("similarity error: {0}")]
    Similarity(#[from] SimilarityError),

    /// Cross-tier congruence error during merge.
    #[error("merge error: {0}")]
    Merge(#[from] MergeError),

    /// Malformed tier input.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// A single artifact export failure.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// One or more artifacts failed to write; siblings were still attempted.
    #[error("export failed for: {}", artifacts.join(", "))]
    ExportFailed {
        /// Names of every artifact that failed.
        artifacts: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_error_names_every_missing_id() {
        let err = MergeError::MissingDocuments {
            ids: vec!["2".to_string(), "7".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("2"), "message must name id 2: {msg}");
        assert!(msg.contains("7"), "message must name id 7: {msg}");
    }

    #[test]
    fn export_error_reports_artifact() {
        let err = ExportError::Io {
            artifact: "similarity matrix",
            path: PathBuf::from("/nope/sim.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing dir"),
        };
        assert_eq!(err.artifact(), "similarity matrix");
        assert!(err.to_string().contains("similarity matrix"));
    }

    #[test]
    fn unified_error_wraps_config() {
        let err: HierarchyError = ConfigError::InvalidMaxAssign { got: 0 }.into();
        assert!(matches!(err, HierarchyError::Config(_)));
        assert!(err.to_string().contains("maxAssign"));
    }
}
