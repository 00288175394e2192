//! User profile construction from reading history.
//!
//! A profile condenses a user's history into two signals used by the
//! recommender: the **aggregate embedding** (component-wise mean of the
//! history embeddings) feeding vector similarity, and the **top keywords**
//! (most frequent history keywords) feeding the query filter.
//!
//! Construction is pure and deterministic: the same history always yields
//! the same profile, so ranking ties are broken by order of first
//! appearance rather than hash order.

use std::collections::HashMap;

use crate::error::{Result, ValidationError};
use crate::types::Embedding;

/// A user's interest profile, derived from their reading history.
#[derive(Clone, Debug, PartialEq)]
pub struct UserProfile {
    /// Component-wise mean of the history embeddings.
    pub embedding: Embedding,

    /// The most frequent history keywords, frequency-descending.
    ///
    /// At most K entries (fewer when the history yields fewer distinct
    /// keywords); possibly empty for all-noise histories.
    pub top_keywords: Vec<String>,
}

/// Builds a profile from per-item embeddings and keyword lists.
///
/// `embeddings` and `keyword_lists` are parallel slices over the same
/// history items. An empty history is a validation error: there is no
/// meaningful zero-history profile.
pub fn build_profile(
    embeddings: &[Embedding],
    keyword_lists: &[Vec<String>],
    top_k: usize,
) -> Result<UserProfile> {
    Ok(UserProfile {
        embedding: mean_embedding(embeddings)?,
        top_keywords: rank_keywords(keyword_lists, top_k),
    })
}

/// Computes the component-wise mean of a set of embeddings.
///
/// # Errors
///
/// - [`ValidationError::EmptyHistory`] for an empty slice
/// - [`ValidationError::DimensionMismatch`] when dimensions drift within
///   the slice (a symptom of mixing embedding models)
pub fn mean_embedding(embeddings: &[Embedding]) -> Result<Embedding> {
    let Some(first) = embeddings.first() else {
        return Err(ValidationError::EmptyHistory.into());
    };

    let dimension = first.len();
    let mut sum = vec![0.0f64; dimension];

    for embedding in embeddings {
        if embedding.len() != dimension {
            return Err(
                ValidationError::dimension_mismatch(dimension, embedding.len()).into(),
            );
        }
        for (acc, v) in sum.iter_mut().zip(embedding) {
            *acc += f64::from(*v);
        }
    }

    // Accumulate in f64 to keep the mean stable for long histories.
    let n = embeddings.len() as f64;
    Ok(sum.into_iter().map(|acc| (acc / n) as f32).collect())
}

/// Ranks keywords across the history by frequency, descending.
///
/// Ties are broken by order of first appearance across the concatenated
/// history, making the ranking fully deterministic. At most `top_k`
/// keywords are returned.
pub fn rank_keywords(keyword_lists: &[Vec<String>], top_k: usize) -> Vec<String> {
    if top_k == 0 {
        return Vec::new();
    }

    // keyword -> (count, index of first appearance)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut order = 0usize;

    for keywords in keyword_lists {
        for keyword in keywords {
            counts
                .entry(keyword)
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, order));
            order += 1;
        }
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    ranked
        .into_iter()
        .take(top_k)
        .map(|(keyword, _)| keyword.to_string())
        .collect()
}
