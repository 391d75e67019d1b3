//! Trained tier loading.
//!
//! A trained tier arrives as one JSON file holding the tier's topics and
//! its corpus, using the same records the exporter writes, so a previous
//! run's output loads straight back in. Distribution vectors are validated
//! against the tier's declared topic count on the way in: alignment between
//! a topic's index and a distribution entry is positional, so a wrong
//! length is rejected at the boundary instead of corrupting downstream
//! stages.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{HierarchyError, InputError};
use crate::export::{CorpusFile, CorpusMetadata, DocRecord, TopicRecord};
use crate::store::{DocumentSet, TopicStore};
use crate::types::Document;

/// On-disk form of a trained tier: topics plus corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierFile {
    /// Tier topics in id order.
    pub topics: Vec<TopicRecord>,
    /// Corpus metadata.
    pub metadata: CorpusMetadata,
    /// Per-document records.
    pub corpus: Vec<DocRecord>,
}

/// One trained tier, ready for reconciliation.
#[derive(Debug, Clone)]
pub struct TrainedTier {
    /// The tier's topics.
    pub topics: TopicStore,
    /// The tier's documents, index-ordered.
    pub documents: DocumentSet,
}

impl TrainedTier {
    /// Assemble a tier from already-validated parts.
    pub fn new(topics: TopicStore, documents: DocumentSet) -> Self {
        Self { topics, documents }
    }

    /// Load a tier file and validate it against the declared topic count.
    ///
    /// `tier` names the tier in error messages ("main tier" / "sub tier").
    pub fn load(
        path: &Path,
        declared_topics: usize,
        tier: &'static str,
    ) -> Result<Self, HierarchyError> {
        let text = std::fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: TierFile = serde_json::from_str(&text).map_err(|source| InputError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let topics = TopicStore::new(file.topics.into_iter().map(TopicRecord::into_topic).collect())?;
        topics.check_declared_count(tier, declared_topics)?;

        let mut docs = Vec::with_capacity(file.corpus.len());
        for record in file.corpus {
            let doc = record.into_document()?;
            if let Some(dist) = doc.main_topic_distribution() {
                if dist.len() != declared_topics {
                    return Err(InputError::DistributionLength {
                        doc_id: doc.id.clone(),
                        expected: declared_topics,
                        found: dist.len(),
                    }
                    .into());
                }
            }
            docs.push(doc);
        }
        let documents = DocumentSet::from_documents(docs)?;

        info!(
            ?path,
            tier,
            topics = topics.len(),
            documents = documents.len(),
            "loaded trained tier"
        );
        Ok(Self::new(topics, documents))
    }
}

/// Load a merged corpus artifact back into documents, in index order.
///
/// Round-trip counterpart of [`crate::export::write_corpus`].
pub fn load_corpus(path: &Path) -> Result<Vec<Document>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: CorpusFile = serde_json::from_str(&text).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    file.corpus
        .into_iter()
        .map(DocRecord::into_document)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::OutputDetail;
    use crate::types::Topic;
    use std::io::Write;

    fn tier_json() -> String {
        serde_json::json!({
            "topics": [
                {"id": 0, "label": "t0", "wordWeights": [0.8, 0.2], "linkedTopicIds": []},
                {"id": 1, "label": "t1", "wordWeights": [0.1, 0.9], "linkedTopicIds": []}
            ],
            "metadata": {"totalDocs": 2},
            "corpus": [
                {"docId": "0", "docIndex": 0, "docData": {},
                 "mainTopicDistribution": [0.6, 0.4]},
                {"docId": "1", "docIndex": 1, "docData": {}, "tooShort": true}
            ]
        })
        .to_string()
    }

    fn write_tmp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_a_well_formed_tier() {
        let f = write_tmp(&tier_json());
        let tier = TrainedTier::load(f.path(), 2, "main tier").unwrap();
        assert_eq!(tier.topics.len(), 2);
        assert_eq!(tier.documents.len(), 2);
        assert_eq!(
            tier.documents.get("0").unwrap().main_topic_distribution(),
            Some(&[0.6, 0.4][..])
        );
        assert!(tier.documents.get("1").unwrap().too_short);
    }

    #[test]
    fn declared_count_mismatch_is_fatal() {
        let f = write_tmp(&tier_json());
        let err = TrainedTier::load(f.path(), 3, "main tier").unwrap_err();
        assert!(matches!(err, HierarchyError::Config(_)), "got {err:?}");
    }

    #[test]
    fn wrong_distribution_length_is_rejected() {
        let bad = tier_json().replace("[0.6,0.4]", "[0.6,0.3,0.1]");
        let f = write_tmp(&bad);
        let err = TrainedTier::load(f.path(), 2, "main tier").unwrap_err();
        match err {
            HierarchyError::Input(InputError::DistributionLength {
                doc_id,
                expected,
                found,
            }) => {
                assert_eq!(doc_id, "0");
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn corpus_export_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");

        let mut doc = Document::new("42", 0);
        doc.set_lemmas("alpha beta", 2);
        doc.set_main_topic_distribution(&[0.123456, 0.876544]);
        let set = DocumentSet::from_documents(vec![doc]).unwrap();
        crate::export::write_corpus(&path, &set, OutputDetail::Model).unwrap();

        let loaded = load_corpus(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        // ceiling-rounded on store, stable on reload
        assert_eq!(
            loaded[0].main_topic_distribution(),
            Some(&[0.1235, 0.8766][..])
        );

        // re-serialize: byte-identical corpus (no further drift)
        let path2 = dir.path().join("documents2.json");
        let set2 = DocumentSet::from_documents(loaded).unwrap();
        crate::export::write_corpus(&path2, &set2, OutputDetail::Model).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            std::fs::read_to_string(&path2).unwrap()
        );
    }

    #[test]
    fn tier_load_accepts_reexported_topics() {
        let dir = tempfile::tempdir().unwrap();
        let topics_path = dir.path().join("topics.json");
        let store = TopicStore::new(vec![
            Topic::new(0, "a", vec![0.5, 0.5]),
            Topic::new(1, "b", vec![0.9, 0.1]),
        ])
        .unwrap();
        crate::export::write_topics(&topics_path, &store, OutputDetail::Model, "main topics")
            .unwrap();

        let records: Vec<TopicRecord> =
            serde_json::from_str(&std::fs::read_to_string(&topics_path).unwrap()).unwrap();
        let reloaded =
            TopicStore::new(records.into_iter().map(TopicRecord::into_topic).collect()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get(1).unwrap().word_weights, vec![0.9, 0.1]);
    }
}
