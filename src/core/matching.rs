//! Match decisions on top of the raw similarity score.
//!
//! The score itself carries no threshold; these helpers apply a caller-chosen one.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::core::normalize::normalize_name;
use crate::core::similarity::name_similarity;

/// Cutoff for accepting a hosting-site lookup result as the same model.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.85;

/// Stricter cutoff used when a user compares two names directly.
pub const INTERACTIVE_MATCH_THRESHOLD: f64 = 0.9;

/// Weight of the file-name score when ranking lookup candidates.
const FILE_NAME_WEIGHT: f64 = 0.7;
/// Weight of the listing-name score when ranking lookup candidates.
const MODEL_NAME_WEIGHT: f64 = 0.3;

/// Two names, their normalized forms, the score and the decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub name1: String,
    pub name2: String,
    pub normalized1: String,
    pub normalized2: String,
    pub similarity: f64,
    pub is_match: bool,
}

impl MatchReport {
    pub fn new(name1: &str, name2: &str, threshold: f64) -> Self {
        let similarity = name_similarity(name1, name2);
        Self {
            name1: name1.to_string(),
            name2: name2.to_string(),
            normalized1: normalize_name(name1),
            normalized2: normalize_name(name2),
            similarity,
            is_match: similarity >= threshold,
        }
    }
}

/// One downloadable file of one listing, as returned by a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Listing (model page) name.
    #[serde(default)]
    pub model_name: String,
    pub file_name: String,
}

/// The winning candidate of [`pick_best`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestMatch {
    pub index: usize,
    pub candidate: Candidate,
    pub similarity: f64,
    /// The file name equals the query byte for byte.
    pub exact: bool,
    /// `similarity >= threshold`.
    pub confident: bool,
}

/// Error reading a candidate list.
#[derive(Debug, thiserror::Error)]
pub enum CandidatesError {
    #[error("Failed to read candidates: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid candidates JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a JSON array of candidates.
pub fn load_candidates<R: Read>(reader: R) -> Result<Vec<Candidate>, CandidatesError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Score a candidate against the query, favouring the file name over the listing name.
pub fn candidate_score(query: &str, candidate: &Candidate) -> f64 {
    let file = name_similarity(query, &candidate.file_name);
    let model = name_similarity(query, &candidate.model_name);
    file * FILE_NAME_WEIGHT + model * MODEL_NAME_WEIGHT
}

/// Pick the candidate that best matches `query`.
///
/// An exact file-name match wins outright. Otherwise the first candidate with the
/// highest [`candidate_score`] wins; a score of 0.0 never does.
pub fn pick_best(query: &str, candidates: &[Candidate], threshold: f64) -> Option<BestMatch> {
    if let Some(index) = candidates.iter().position(|c| c.file_name == query) {
        log::debug!("exact file name match for {query:?} at candidate {index}");
        return Some(BestMatch {
            index,
            candidate: candidates[index].clone(),
            similarity: 1.0,
            exact: true,
            confident: true,
        });
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let score = candidate_score(query, candidate);
        log::debug!(
            "candidate {index} ({:?} / {:?}) scored {score:.4}",
            candidate.model_name,
            candidate.file_name
        );
        if score > best.map_or(0.0, |(_, s)| s) {
            best = Some((index, score));
        }
    }

    best.map(|(index, similarity)| BestMatch {
        index,
        candidate: candidates[index].clone(),
        similarity,
        exact: false,
        confident: similarity >= threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(model_name: &str, file_name: &str) -> Candidate {
        Candidate {
            model_name: model_name.to_string(),
            file_name: file_name.to_string(),
        }
    }

    #[test]
    fn report_uses_threshold() {
        let report = MatchReport::new(
            "concept_model.safetensors",
            "concept_model_v2.safetensors",
            DEFAULT_MATCH_THRESHOLD,
        );
        assert!(report.is_match);
        assert_eq!(report.normalized1, "concept model");
        assert_eq!(report.normalized2, "concept model v2");

        let strict = MatchReport::new(
            "concept_model.safetensors",
            "concept_model_v2.safetensors",
            0.95,
        );
        assert!(!strict.is_match);
    }

    #[test]
    fn report_serializes_field_names() {
        let report = MatchReport::new("a_b", "a-b", INTERACTIVE_MATCH_THRESHOLD);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["similarity"], 1.0);
        assert_eq!(json["is_match"], true);
        assert_eq!(json["normalized1"], "a b");
    }

    #[test]
    fn exact_file_name_wins_outright() {
        let candidates = vec![
            candidate("Zuki Cute", "zuki-cute-ill-v40-sdxl.safetensors"),
            candidate("Something else", "zukiCuteILL_v40.safetensors"),
        ];
        let best = pick_best("zukiCuteILL_v40.safetensors", &candidates, 0.85).unwrap();
        assert!(best.exact);
        assert_eq!(best.index, 1);
        assert_eq!(best.similarity, 1.0);
    }

    #[test]
    fn weighted_score_picks_closest_file() {
        let candidates = vec![
            candidate("Anime Style", "anime_style_v2.safetensors"),
            candidate("Zuki Cute ILL", "zuki-cute-ill-v40-sdxl.safetensors"),
        ];
        let best = pick_best("zukiCuteILL_v40.safetensors", &candidates, 0.85).unwrap();
        assert_eq!(best.index, 1);
        assert!(!best.exact);
        assert!(best.confident);
    }

    #[test]
    fn low_scores_are_returned_but_not_confident() {
        let candidates = vec![candidate("Model B", "model_b.safetensors")];
        let best = pick_best("model_a.safetensors", &candidates, 0.85).unwrap();
        assert!(!best.confident);
        assert!(best.similarity > 0.0);
    }

    #[test]
    fn ties_keep_the_first_candidate() {
        let candidates = vec![
            candidate("Model B", "model_b.safetensors"),
            candidate("Model B", "model_b.safetensors"),
        ];
        let best = pick_best("model_a.safetensors", &candidates, 0.85).unwrap();
        assert_eq!(best.index, 0);
    }

    #[test]
    fn unrelated_or_empty_lists_yield_nothing() {
        assert!(pick_best("model.safetensors", &[], 0.85).is_none());
        let candidates = vec![candidate("Landscape", "landscape_xl.safetensors")];
        assert!(pick_best("anime_girl.safetensors", &candidates, 0.85).is_none());
    }

    #[test]
    fn load_candidates_defaults_model_name() {
        let json = r#"[{"file_name": "a.safetensors"}, {"model_name": "B", "file_name": "b.ckpt"}]"#;
        let candidates = load_candidates(json.as_bytes()).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].model_name, "");
        assert_eq!(candidates[1].model_name, "B");
    }

    #[test]
    fn load_candidates_rejects_bad_json() {
        let err = load_candidates("{".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Invalid candidates JSON"));
    }
}
