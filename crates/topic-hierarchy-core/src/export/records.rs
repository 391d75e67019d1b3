//! Serde records for the JSON artifacts.
//!
//! Field names mirror the on-disk corpus format (`docId`, `docIndex`, ...).
//! Optional fields are emitted only when present — absence is encoded by
//! omission, never by `null` placeholders — and the same records are used
//! to load a previous run's output back in, so storage round-trips.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::types::{Document, Topic};

use super::OutputDetail;

/// On-disk form of a [`Document`].
///
/// Which fields are populated is decided by the explicit [`OutputDetail`]
/// parameter at serialization time; there is no process-wide switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocRecord {
    /// Document id.
    pub doc_id: String,
    /// Ingestion index.
    pub doc_index: usize,
    /// Opaque source attributes.
    pub doc_data: BTreeMap<String, String>,
    /// Present (and `true`) only for documents excluded from training.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub too_short: Option<bool>,
    /// Present (and `true`) only for post-hoc inferred documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inferred: Option<bool>,
    /// Lemma count; emitted at `Lemmas` detail and above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_lemmas: Option<usize>,
    /// Lemmatised text; emitted at `Lemmas` detail and above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemmas: Option<String>,
    /// Main-tier distribution; emitted at `Model` detail for modelled docs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_topic_distribution: Option<Vec<f64>>,
    /// Sub-tier distribution, present only after merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_topic_distribution: Option<Vec<f64>>,
    /// Diagnostic word distances, each independently optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_topic_full_word_distances: Option<Vec<f64>>,
    /// Sub-tier counterpart; only meaningful with the main-tier vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_topic_full_word_distances: Option<Vec<f64>>,
    /// Component-level diagnostic distances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_topic_comp_word_distances: Option<Vec<f64>>,
    /// Sub-tier counterpart; only meaningful with the main-tier vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_topic_comp_word_distances: Option<Vec<f64>>,
}

impl DocRecord {
    /// Project a document into its on-disk form at the given detail level.
    ///
    /// `Model` detail includes topic distributions only for documents that
    /// were actually modelled: a `too_short` document stays at its basic
    /// fields no matter the level, which is how absence of a distribution
    /// is explained by the flag rather than a null.
    pub fn from_document(doc: &Document, detail: OutputDetail) -> Self {
        let mut record = Self {
            doc_id: doc.id.clone(),
            doc_index: doc.index,
            doc_data: doc.fields.clone(),
            too_short: doc.too_short.then_some(true),
            inferred: doc.inferred.then_some(true),
            num_lemmas: None,
            lemmas: None,
            main_topic_distribution: None,
            sub_topic_distribution: None,
            main_topic_full_word_distances: None,
            sub_topic_full_word_distances: None,
            main_topic_comp_word_distances: None,
            sub_topic_comp_word_distances: None,
        };
        match detail {
            OutputDetail::Basic => {}
            OutputDetail::Lemmas => {
                record.num_lemmas = Some(doc.num_lemmas);
                record.lemmas = Some(doc.lemmas.clone());
            }
            OutputDetail::Model => {
                if !doc.too_short {
                    record.num_lemmas = Some(doc.num_lemmas);
                    record.lemmas = Some(doc.lemmas.clone());
                    record.main_topic_distribution =
                        doc.main_topic_distribution().map(<[f64]>::to_vec);
                    record.sub_topic_distribution =
                        doc.sub_topic_distribution().map(<[f64]>::to_vec);
                    record.main_topic_full_word_distances =
                        doc.main_topic_full_word_distances().map(<[f64]>::to_vec);
                    record.sub_topic_full_word_distances =
                        doc.sub_topic_full_word_distances().map(<[f64]>::to_vec);
                    record.main_topic_comp_word_distances =
                        doc.main_topic_comp_word_distances().map(<[f64]>::to_vec);
                    record.sub_topic_comp_word_distances =
                        doc.sub_topic_comp_word_distances().map(<[f64]>::to_vec);
                }
            }
        }
        record
    }

    /// Rebuild a document from its on-disk form.
    ///
    /// Model fields are ignored for `too_short` documents. Sub-tier
    /// vectors without their main-tier prerequisite are rejected rather
    /// than silently carried.
    pub fn into_document(self) -> Result<Document, InputError> {
        let mut doc = Document::new(self.doc_id.clone(), self.doc_index);
        doc.fields = self.doc_data;
        doc.too_short = self.too_short.unwrap_or(false);
        doc.inferred = self.inferred.unwrap_or(false);
        doc.num_lemmas = self.num_lemmas.unwrap_or(0);
        doc.lemmas = self.lemmas.unwrap_or_default();
        if doc.too_short {
            return Ok(doc);
        }

        if let Some(main) = &self.main_topic_distribution {
            doc.set_main_topic_distribution(main);
            if let Some(sub) = &self.sub_topic_distribution {
                doc.set_sub_topic_distribution(Some(sub));
            }
        } else if self.sub_topic_distribution.is_some() {
            return Err(InputError::OrphanDiagnostic {
                doc_id: self.doc_id,
                field: "subTopicDistribution",
            });
        }

        match (
            &self.main_topic_full_word_distances,
            &self.sub_topic_full_word_distances,
        ) {
            (Some(main), sub) => {
                doc.set_main_topic_full_word_distances(main);
                if let Some(sub) = sub {
                    doc.set_sub_topic_full_word_distances(sub);
                }
            }
            (None, Some(_)) => {
                return Err(InputError::OrphanDiagnostic {
                    doc_id: self.doc_id,
                    field: "subTopicFullWordDistances",
                });
            }
            (None, None) => {}
        }

        match (
            &self.main_topic_comp_word_distances,
            &self.sub_topic_comp_word_distances,
        ) {
            (Some(main), sub) => {
                doc.set_main_topic_comp_word_distances(main);
                if let Some(sub) = sub {
                    doc.set_sub_topic_comp_word_distances(sub);
                }
            }
            (None, Some(_)) => {
                return Err(InputError::OrphanDiagnostic {
                    doc_id: self.doc_id,
                    field: "subTopicCompWordDistances",
                });
            }
            (None, None) => {}
        }

        Ok(doc)
    }
}

/// On-disk form of a [`Topic`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRecord {
    /// 0-based topic id within its tier.
    pub id: usize,
    /// Human-readable label.
    pub label: String,
    /// Topic-by-word weights; emitted only at `Model` detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_weights: Option<Vec<f64>>,
    /// Ids of linked topics in the other tier, ascending.
    pub linked_topic_ids: Vec<usize>,
}

impl TopicRecord {
    /// Project a topic into its on-disk form.
    pub fn from_topic(topic: &Topic, detail: OutputDetail) -> Self {
        Self {
            id: topic.id,
            label: topic.label.clone(),
            word_weights: match detail {
                OutputDetail::Model => Some(topic.word_weights.clone()),
                _ => None,
            },
            linked_topic_ids: topic.linked_ids_sorted(),
        }
    }

    /// Rebuild a topic from its on-disk form.
    pub fn into_topic(self) -> Topic {
        let mut topic = Topic::new(self.id, self.label, self.word_weights.unwrap_or_default());
        for id in self.linked_topic_ids {
            topic.add_linked_id(id);
        }
        topic
    }
}

/// Corpus file metadata header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusMetadata {
    /// Number of documents in the corpus array.
    pub total_docs: usize,
}

/// The merged corpus artifact: `{"metadata":{...},"corpus":[...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusFile {
    /// Corpus-level metadata.
    pub metadata: CorpusMetadata,
    /// Per-document records in ingestion index order.
    pub corpus: Vec<DocRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modelled_doc() -> Document {
        let mut doc = Document::new("7", 7);
        doc.add_field("title", "a title");
        doc.set_lemmas("topic model corpus", 3);
        doc.set_main_topic_distribution(&[0.6, 0.4]);
        doc.set_sub_topic_distribution(Some(&[0.2, 0.3, 0.5]));
        doc
    }

    #[test]
    fn basic_detail_has_no_lemmas_or_model_fields() {
        let json =
            serde_json::to_value(DocRecord::from_document(&modelled_doc(), OutputDetail::Basic))
                .unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("docId"));
        assert!(obj.contains_key("docData"));
        assert!(!obj.contains_key("lemmas"));
        assert!(!obj.contains_key("mainTopicDistribution"));
        assert!(!obj.contains_key("tooShort"), "false flag must be omitted");
    }

    #[test]
    fn lemmas_detail_adds_lemma_fields_only() {
        let json = serde_json::to_value(DocRecord::from_document(
            &modelled_doc(),
            OutputDetail::Lemmas,
        ))
        .unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["numLemmas"], 3);
        assert_eq!(obj["lemmas"], "topic model corpus");
        assert!(!obj.contains_key("mainTopicDistribution"));
    }

    #[test]
    fn model_detail_adds_distributions() {
        let json =
            serde_json::to_value(DocRecord::from_document(&modelled_doc(), OutputDetail::Model))
                .unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["mainTopicDistribution"].as_array().unwrap().len(), 2);
        assert_eq!(obj["subTopicDistribution"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn too_short_doc_is_basic_even_at_model_detail() {
        let mut doc = Document::new("s", 0);
        doc.too_short = true;
        let json = serde_json::to_value(DocRecord::from_document(&doc, OutputDetail::Model))
            .unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["tooShort"], true);
        assert!(!obj.contains_key("mainTopicDistribution"));
        assert!(!obj.contains_key("lemmas"));
    }

    #[test]
    fn record_round_trips_through_document() {
        let original = modelled_doc();
        let record = DocRecord::from_document(&original, OutputDetail::Model);
        let rebuilt = record.into_document().unwrap();
        assert_eq!(rebuilt.id, original.id);
        assert_eq!(
            rebuilt.main_topic_distribution(),
            original.main_topic_distribution()
        );
        assert_eq!(
            rebuilt.sub_topic_distribution(),
            original.sub_topic_distribution()
        );
    }

    #[test]
    fn orphan_sub_distribution_is_rejected() {
        let record = DocRecord {
            sub_topic_distribution: Some(vec![0.5, 0.5]),
            ..DocRecord::from_document(&Document::new("x", 0), OutputDetail::Basic)
        };
        let err = record.into_document().unwrap_err();
        assert!(matches!(
            err,
            InputError::OrphanDiagnostic { field: "subTopicDistribution", .. }
        ));
    }

    #[test]
    fn orphan_sub_distances_are_rejected() {
        let mut base = DocRecord::from_document(&modelled_doc(), OutputDetail::Model);
        base.sub_topic_full_word_distances = Some(vec![0.1, 0.2]);
        let err = base.into_document().unwrap_err();
        assert!(matches!(
            err,
            InputError::OrphanDiagnostic { field: "subTopicFullWordDistances", .. }
        ));
    }

    #[test]
    fn topic_record_emits_weights_only_at_model_detail() {
        let mut topic = Topic::new(1, "trade economy", vec![0.3, 0.7]);
        topic.add_linked_id(0);
        let basic = serde_json::to_value(TopicRecord::from_topic(&topic, OutputDetail::Basic))
            .unwrap();
        assert!(!basic.as_object().unwrap().contains_key("wordWeights"));
        let model = serde_json::to_value(TopicRecord::from_topic(&topic, OutputDetail::Model))
            .unwrap();
        assert_eq!(model["wordWeights"].as_array().unwrap().len(), 2);
        assert_eq!(model["linkedTopicIds"], serde_json::json!([0]));
    }
}
