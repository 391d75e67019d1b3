//! Topic-to-topic similarity matrix.
//!
//! The engine treats the similarity metric as pluggable: any precomputed
//! matrix can be wrapped with [`SimilarityMatrix::from_rows`], as long as
//! higher means more similar. The shipped default is cosine similarity
//! between the two tiers' topic word-weight rows, computed row-parallel.
//!
//! Rows are sub-topics, columns are main topics. The matrix is never
//! mutated after construction.

use rayon::prelude::*;

use crate::error::SimilarityError;
use crate::store::TopicStore;

/// Dense, shape-validated `sub_count x main_count` similarity matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f64>>,
    main_count: usize,
}

impl SimilarityMatrix {
    /// Wrap a precomputed matrix, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SimilarityError> {
        let first_len = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.is_empty() || first_len == 0 {
            return Err(SimilarityError::EmptyMatrix);
        }
        for (row, values) in rows.iter().enumerate() {
            if values.len() != first_len {
                return Err(SimilarityError::RaggedRow {
                    row,
                    expected: first_len,
                    found: values.len(),
                });
            }
        }
        Ok(Self {
            rows,
            main_count: first_len,
        })
    }

    /// Cosine similarity between every sub-topic and every main topic,
    /// over their word-weight rows.
    ///
    /// Both tiers must share the vocabulary dimension; zero-magnitude
    /// weight vectors yield similarity 0.0 rather than NaN.
    pub fn cosine_from_topics(
        sub: &TopicStore,
        main: &TopicStore,
    ) -> Result<Self, SimilarityError> {
        if sub.is_empty() || main.is_empty() {
            return Err(SimilarityError::EmptyMatrix);
        }
        let sub_dim = check_tier_weights(sub, "sub")?;
        let main_dim = check_tier_weights(main, "main")?;
        if sub_dim != main_dim {
            return Err(SimilarityError::DimensionMismatch { main_dim, sub_dim });
        }

        let main_rows: Vec<&[f64]> = main.iter().map(|t| t.word_weights.as_slice()).collect();
        let rows: Vec<Vec<f64>> = sub
            .iter()
            .collect::<Vec<_>>()
            .par_iter()
            .map(|sub_topic| {
                main_rows
                    .iter()
                    .map(|main_weights| cosine_similarity(&sub_topic.word_weights, main_weights))
                    .collect()
            })
            .collect();

        Self::from_rows(rows)
    }

    /// Number of sub-topics (rows).
    pub fn sub_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of main topics (columns).
    pub fn main_count(&self) -> usize {
        self.main_count
    }

    /// Similarity row for one sub-topic.
    pub fn row(&self, sub_topic: usize) -> &[f64] {
        &self.rows[sub_topic]
    }
}

/// Every topic in a tier must carry the same non-zero number of word
/// weights. Returns the shared vocabulary dimension.
fn check_tier_weights(
    topics: &TopicStore,
    tier: &'static str,
) -> Result<usize, SimilarityError> {
    let dim = topics.get(0).map(|t| t.word_weights.len()).unwrap_or(0);
    for topic in topics.iter() {
        if topic.word_weights.is_empty() {
            return Err(SimilarityError::MissingWordWeights {
                tier,
                topic: topic.id,
            });
        }
        if topic.word_weights.len() != dim {
            return Err(SimilarityError::RaggedWordWeights {
                tier,
                topic: topic.id,
                expected: dim,
                found: topic.word_weights.len(),
            });
        }
    }
    Ok(dim)
}

/// Cosine similarity between two equal-length vectors.
///
/// Zero-magnitude input yields 0.0; NaN and infinity are clamped out so a
/// pathological weight row can never poison the assignment scan.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }
    let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
    if sim.is_nan() || sim.is_infinite() {
        0.0
    } else {
        sim
    }
}
