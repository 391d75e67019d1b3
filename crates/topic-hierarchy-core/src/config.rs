//! Hierarchy reconciliation specification.
//!
//! Deserialized from the project JSON file. The similarity and assignment
//! exports are enabled by configuring their output filenames: an absent or
//! empty filename disables that artifact, there is no separate boolean.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::export::OutputDetail;

fn default_max_assign() -> usize {
    1
}

/// Per-tier model section: declared topic count, trained-tier input file
/// and topic output filename.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSpec {
    /// Declared topic count for the tier.
    pub topics: usize,
    /// Path to the trained tier input file (topics + corpus).
    pub input: String,
    /// Topic artifact filename, relative to `outputDir`.
    pub topic_output: String,
}

/// The `hierarchy` section of the spec.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchySection {
    /// Maximum number of main topics assigned to a sub topic. Defaults to 1.
    #[serde(default = "default_max_assign")]
    pub max_assign: usize,
    /// Similarity matrix filename, relative to `outputDir`; empty disables.
    #[serde(default)]
    pub model_sim_output: String,
    /// Assignment table filename, relative to `outputDir`; empty disables.
    #[serde(default)]
    pub assignment_output: String,
}

impl Default for HierarchySection {
    fn default() -> Self {
        Self {
            max_assign: default_max_assign(),
            model_sim_output: String::new(),
            assignment_output: String::new(),
        }
    }
}

/// Full reconciliation spec for one pipeline run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchySpec {
    /// Directory receiving every artifact.
    #[serde(default)]
    pub output_dir: String,
    /// Merged corpus filename, relative to `outputDir`.
    pub document_output: String,
    /// Document serialization detail level.
    #[serde(default)]
    pub output_detail: OutputDetail,
    /// Main (coarse) tier model section.
    pub main_model: ModelSpec,
    /// Sub (fine) tier model section.
    pub sub_model: ModelSpec,
    /// Hierarchy assignment section.
    #[serde(default)]
    pub hierarchy: HierarchySection,
}

impl HierarchySpec {
    /// Load and validate a spec from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let spec: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        spec.validate()?;
        Ok(spec)
    }

    /// Check the spec before any assignment work begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hierarchy.max_assign == 0 {
            return Err(ConfigError::InvalidMaxAssign {
                got: self.hierarchy.max_assign,
            });
        }
        if self.main_model.topics == 0 {
            return Err(ConfigError::InvalidTopicCount { what: "main tier" });
        }
        if self.sub_model.topics == 0 {
            return Err(ConfigError::InvalidTopicCount { what: "sub tier" });
        }
        Ok(())
    }

    /// Fan-out limit for the assigner.
    pub fn max_assign(&self) -> usize {
        self.hierarchy.max_assign
    }

    /// Whether the similarity matrix export is enabled.
    pub fn output_similarity(&self) -> bool {
        !self.hierarchy.model_sim_output.is_empty()
    }

    /// Whether the assignment table export is enabled.
    pub fn output_assignment(&self) -> bool {
        !self.hierarchy.assignment_output.is_empty()
    }

    fn in_output_dir(&self, filename: &str) -> PathBuf {
        Path::new(&self.output_dir).join(filename)
    }

    /// Path of the merged corpus artifact.
    pub fn document_output_path(&self) -> PathBuf {
        self.in_output_dir(&self.document_output)
    }

    /// Path of the main tier topic artifact.
    pub fn main_topic_output_path(&self) -> PathBuf {
        self.in_output_dir(&self.main_model.topic_output)
    }

    /// Path of the sub tier topic artifact.
    pub fn sub_topic_output_path(&self) -> PathBuf {
        self.in_output_dir(&self.sub_model.topic_output)
    }

    /// Path of the similarity matrix artifact, when enabled.
    pub fn similarity_output_path(&self) -> Option<PathBuf> {
        self.output_similarity()
            .then(|| self.in_output_dir(&self.hierarchy.model_sim_output))
    }

    /// Path of the assignment table artifact, when enabled.
    pub fn assignment_output_path(&self) -> Option<PathBuf> {
        self.output_assignment()
            .then(|| self.in_output_dir(&self.hierarchy.assignment_output))
    }
}
