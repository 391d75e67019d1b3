//! Per-document record carried through the pipeline.
//!
//! A [`Document`] is created by ingestion (id + index + source fields),
//! mutated by training (distributions and flags), mutated once more by the
//! merger (the other tier's distribution) and read-only from then on.
//!
//! All distribution values are stored pre-rounded to 4 decimals, away from
//! zero, so that exports are reproducible byte-for-byte.

use std::collections::BTreeMap;

use super::rounding::round_distribution;

/// A single corpus document.
///
/// Distribution vectors are private: they can only be set through the
/// rounding setters, which keeps the 4-decimal storage invariant intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Unique id within a tier's corpus; stable across tiers for the same
    /// underlying source record.
    pub id: String,
    /// Positional index assigned at ingestion.
    pub index: usize,
    /// Arbitrary source attributes, opaque to the engine.
    pub fields: BTreeMap<String, String>,
    /// Lemma count, derived upstream and passed through unchanged.
    pub num_lemmas: usize,
    /// Lemmatised text, derived upstream and passed through unchanged.
    pub lemmas: String,
    /// Excluded from model training; carries no distribution but still
    /// round-trips through storage.
    pub too_short: bool,
    /// Distribution produced by post-hoc inference rather than training.
    /// Informational only.
    pub inferred: bool,

    main_topic_distribution: Option<Vec<f64>>,
    sub_topic_distribution: Option<Vec<f64>>,
    main_topic_full_word_distances: Option<Vec<f64>>,
    sub_topic_full_word_distances: Option<Vec<f64>>,
    main_topic_comp_word_distances: Option<Vec<f64>>,
    sub_topic_comp_word_distances: Option<Vec<f64>>,
}

impl Document {
    /// Create a bare document, as the ingestion stage would.
    pub fn new(id: impl Into<String>, index: usize) -> Self {
        Self {
            id: id.into(),
            index,
            fields: BTreeMap::new(),
            num_lemmas: 0,
            lemmas: String::new(),
            too_short: false,
            inferred: false,
            main_topic_distribution: None,
            sub_topic_distribution: None,
            main_topic_full_word_distances: None,
            sub_topic_full_word_distances: None,
            main_topic_comp_word_distances: None,
            sub_topic_comp_word_distances: None,
        }
    }

    /// Prefix the document id, e.g. to mark inferred documents.
    pub fn prefix_id(&mut self, prefix: &str) {
        self.id = format!("{prefix}{}", self.id);
    }

    /// Add a source data entry.
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// A source data value, or empty string when absent.
    pub fn field(&self, key: &str) -> &str {
        self.field_or(key, "")
    }

    /// A source data value, or a caller-supplied default.
    pub fn field_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.fields.get(key).map(String::as_str).unwrap_or(default)
    }

    /// Whether a source data key is present.
    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Keep only the listed source data entries.
    pub fn filter_fields(&mut self, keys: &[&str]) {
        self.fields.retain(|k, _| keys.contains(&k.as_str()));
    }

    /// Set the lemma pass-through data.
    pub fn set_lemmas(&mut self, lemmas: impl Into<String>, num_lemmas: usize) {
        self.lemmas = lemmas.into();
        self.num_lemmas = num_lemmas;
    }

    /// Set the main-tier topic distribution, rounding each value to 4
    /// decimals away from zero.
    pub fn set_main_topic_distribution(&mut self, distribution: &[f64]) {
        self.main_topic_distribution = Some(round_distribution(distribution));
    }

    /// Set the sub-tier topic distribution (rounded). `None` clears nothing:
    /// merge passes `None` through for documents without a distribution.
    pub fn set_sub_topic_distribution(&mut self, distribution: Option<&[f64]>) {
        if let Some(d) = distribution {
            self.sub_topic_distribution = Some(round_distribution(d));
        }
    }

    /// Main-tier topic distribution, absent for `too_short` documents.
    pub fn main_topic_distribution(&self) -> Option<&[f64]> {
        self.main_topic_distribution.as_deref()
    }

    /// Sub-tier topic distribution, present only after merge.
    pub fn sub_topic_distribution(&self) -> Option<&[f64]> {
        self.sub_topic_distribution.as_deref()
    }

    /// Set the main-topic vs. full-document word distance vector (rounded).
    pub fn set_main_topic_full_word_distances(&mut self, distances: &[f64]) {
        self.main_topic_full_word_distances = Some(round_distribution(distances));
    }

    /// Set the sub-topic vs. full-document word distance vector (rounded).
    pub fn set_sub_topic_full_word_distances(&mut self, distances: &[f64]) {
        self.sub_topic_full_word_distances = Some(round_distribution(distances));
    }

    /// Set the main-topic vs. component word distance vector (rounded).
    pub fn set_main_topic_comp_word_distances(&mut self, distances: &[f64]) {
        self.main_topic_comp_word_distances = Some(round_distribution(distances));
    }

    /// Set the sub-topic vs. component word distance vector (rounded).
    pub fn set_sub_topic_comp_word_distances(&mut self, distances: &[f64]) {
        self.sub_topic_comp_word_distances = Some(round_distribution(distances));
    }

    /// Main-topic vs. full-document word distances, when computed.
    pub fn main_topic_full_word_distances(&self) -> Option<&[f64]> {
        self.main_topic_full_word_distances.as_deref()
    }

    /// Sub-topic vs. full-document word distances, when computed.
    pub fn sub_topic_full_word_distances(&self) -> Option<&[f64]> {
        self.sub_topic_full_word_distances.as_deref()
    }

    /// Main-topic vs. component word distances, when computed.
    pub fn main_topic_comp_word_distances(&self) -> Option<&[f64]> {
        self.main_topic_comp_word_distances.as_deref()
    }

    /// Sub-topic vs. component word distances, when computed.
    pub fn sub_topic_comp_word_distances(&self) -> Option<&[f64]> {
        self.sub_topic_comp_word_distances.as_deref()
    }
}
