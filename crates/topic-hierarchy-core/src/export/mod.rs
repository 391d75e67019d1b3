//! Result export: deterministic serialization of topics, the merged
//! corpus, and the optional similarity/assignment tables.
//!
//! What a document record serializes is decided by an explicit
//! [`OutputDetail`] argument threaded into every writer; there is no
//! process-wide output switch. Exports are side-effect-only and
//! independent of each other: a failed write aborts that artifact alone.

mod json;
mod records;
mod tabular;

use serde::{Deserialize, Serialize};

pub use json::{write_corpus, write_topics};
pub use records::{CorpusFile, CorpusMetadata, DocRecord, TopicRecord};
pub use tabular::{write_assignment_table, write_similarity_matrix};

/// How much of a document to serialize. Three mutually exclusive levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputDetail {
    /// Id, index and source data only.
    #[default]
    Basic,
    /// Basic plus lemma count and lemmatised text.
    Lemmas,
    /// Lemmas plus topic distributions and diagnostic distances.
    Model,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_levels_parse_from_config_strings() {
        let parse = |s: &str| serde_json::from_str::<OutputDetail>(s).unwrap();
        assert_eq!(parse("\"basic\""), OutputDetail::Basic);
        assert_eq!(parse("\"lemmas\""), OutputDetail::Lemmas);
        assert_eq!(parse("\"model\""), OutputDetail::Model);
        assert!(serde_json::from_str::<OutputDetail>("\"full\"").is_err());
    }
}
