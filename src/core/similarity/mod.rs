//! Pairwise model-name similarity.
//!
//! Both names are normalized, then compared by word-set overlap (Jaccard) blended with
//! a character-sequence ratio. Three corrections follow, in this order:
//!
//! 1. a penalty when the word counts are very uneven and few words are shared,
//! 2. a floor of 0.90 when one normalized name contains the other,
//! 3. a floor of `min(0.95, 1.2 * jaccard)` when every word of the shorter name
//!    (at least three words) appears in the longer one.
//!
//! Only exact matches (raw, normalized, or as word sets) score 1.0.

use std::collections::HashSet;

use serde::Serialize;

use crate::core::normalize::normalize_name;
use crate::core::sequence::sequence_ratio;

const JACCARD_WEIGHT: f64 = 0.6;
const SEQUENCE_WEIGHT: f64 = 0.4;

/// Word-count ratio above which the uneven-length penalty is considered.
const LENGTH_DISPARITY: f64 = 1.5;
/// Shared words over the larger word set below which the penalty applies.
const SHARED_WORD_FLOOR: f64 = 0.5;
const LENGTH_PENALTY: f64 = 0.7;

const CONTAINMENT_FLOOR: f64 = 0.90;

const CORE_WORD_MIN: usize = 3;
const CORE_WORD_RATIO: f64 = 0.8;
const CORE_WORD_FACTOR: f64 = 1.2;
const CORE_WORD_CAP: f64 = 0.95;

/// Why a comparison ended before the blended score was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortcut {
    EmptyInput,
    IdenticalRaw,
    IdenticalNormalized,
    IdenticalWordSets,
    NoSharedWords,
}

/// Intermediate metrics of a blended comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub shared_words: usize,
    pub total_words: usize,
    pub jaccard: f64,
    pub sequence_ratio: f64,
    /// `0.6 * jaccard + 0.4 * sequence_ratio`, before corrections.
    pub blended: f64,
    pub length_penalty: bool,
    pub containment_boost: bool,
    pub core_word_boost: bool,
}

/// Result of comparing two normalized names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<Shortcut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

impl Comparison {
    fn shortcut(shortcut: Shortcut, score: f64) -> Self {
        Self {
            score,
            shortcut: Some(shortcut),
            metrics: None,
        }
    }
}

/// A full comparison with both normalized forms, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub normalized1: String,
    pub normalized2: String,
    #[serde(flatten)]
    pub comparison: Comparison,
}

/// Similarity of two raw names in `[0.0, 1.0]`. Empty input scores 0.0.
///
/// Symmetric: `name_similarity(a, b) == name_similarity(b, a)`.
pub fn name_similarity(name1: &str, name2: &str) -> f64 {
    if name1.is_empty() || name2.is_empty() {
        return 0.0;
    }
    if name1 == name2 {
        return 1.0;
    }
    compare_normalized(&normalize_name(name1), &normalize_name(name2)).score
}

/// [`name_similarity`] for possibly absent names. An absent name scores 0.0.
pub fn name_similarity_opt(name1: Option<&str>, name2: Option<&str>) -> f64 {
    match (name1, name2) {
        (Some(a), Some(b)) => name_similarity(a, b),
        _ => 0.0,
    }
}

/// Same score as [`name_similarity`], with the normalized forms and the metrics behind it.
pub fn score_breakdown(name1: &str, name2: &str) -> ScoreBreakdown {
    let normalized1 = normalize_name(name1);
    let normalized2 = normalize_name(name2);
    let comparison = if name1.is_empty() || name2.is_empty() {
        Comparison::shortcut(Shortcut::EmptyInput, 0.0)
    } else if name1 == name2 {
        Comparison::shortcut(Shortcut::IdenticalRaw, 1.0)
    } else {
        compare_normalized(&normalized1, &normalized2)
    };
    ScoreBreakdown {
        normalized1,
        normalized2,
        comparison,
    }
}

/// Compare two already-normalized names.
pub fn compare_normalized(norm1: &str, norm2: &str) -> Comparison {
    if norm1 == norm2 {
        return Comparison::shortcut(Shortcut::IdenticalNormalized, 1.0);
    }

    let words1: HashSet<&str> = norm1.split_whitespace().collect();
    let words2: HashSet<&str> = norm2.split_whitespace().collect();
    if words1 == words2 {
        return Comparison::shortcut(Shortcut::IdenticalWordSets, 1.0);
    }

    let shared = words1.intersection(&words2).count();
    if shared == 0 {
        return Comparison::shortcut(Shortcut::NoSharedWords, 0.0);
    }
    let total = words1.union(&words2).count();
    let jaccard = shared as f64 / total as f64;

    // The ratio depends on argument order; fix it so the score is symmetric.
    let sequence = if norm1 <= norm2 {
        sequence_ratio(norm1, norm2)
    } else {
        sequence_ratio(norm2, norm1)
    };

    let blended = jaccard * JACCARD_WEIGHT + sequence * SEQUENCE_WEIGHT;
    let mut score = blended;

    let (shorter, longer) = if words1.len() <= words2.len() {
        (&words1, &words2)
    } else {
        (&words2, &words1)
    };
    let min_words = shorter.len();
    let max_words = longer.len();

    let length_penalty = max_words as f64 > min_words as f64 * LENGTH_DISPARITY
        && (shared as f64 / max_words as f64) < SHARED_WORD_FLOOR;
    if length_penalty {
        score *= LENGTH_PENALTY;
    }

    let containment_boost = norm1.contains(norm2) || norm2.contains(norm1);
    if containment_boost {
        score = score.max(CONTAINMENT_FLOOR);
    }

    let core_matched = shorter.intersection(longer).count();
    let core_word_boost = core_matched == min_words
        && min_words >= CORE_WORD_MIN
        && core_matched as f64 / min_words as f64 >= CORE_WORD_RATIO;
    if core_word_boost {
        score = score.max(CORE_WORD_CAP.min(jaccard * CORE_WORD_FACTOR));
    }

    log::trace!(
        "similarity {norm1:?} vs {norm2:?}: jaccard={jaccard:.4} sequence={sequence:.4} \
         blended={blended:.4} penalty={length_penalty} containment={containment_boost} \
         core_words={core_word_boost} score={score:.4}"
    );

    Comparison {
        score,
        shortcut: None,
        metrics: Some(Metrics {
            shared_words: shared,
            total_words: total,
            jaccard,
            sequence_ratio: sequence,
            blended,
            length_penalty,
            containment_boost,
            core_word_boost,
        }),
    }
}
