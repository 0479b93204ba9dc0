//! Keyword-based clause classifier
//!
//! A lightweight stand-in for a model-backed classifier: each label
//! carries a lexicon of legal keywords, a clause is scored by how many
//! lexicon patterns it matches, and counts are normalized into
//! probability-like confidences. Good enough to drive the pipeline and
//! deterministic enough to test against.

use lazy_static::lazy_static;
use regex::RegexSet;

use clauselens_core::{AnalyzeError, ClauseClassifier, Prediction};

/// Termination and expiry keywords
const TERMINATION_KEYWORDS: &[&str] = &[
    "terminate",
    "terminated",
    "termination",
    "expire",
    "expiration",
    "expiry",
    "rescind",
    "rescission",
    "cancel",
    "cancellation",
    "written notice",
];

/// Confidentiality and non-disclosure keywords
const CONFIDENTIALITY_KEYWORDS: &[&str] = &[
    "confidential",
    "confidentiality",
    "non-disclosure",
    "nondisclosure",
    "proprietary",
    "trade secret",
    "trade secrets",
    "disclose",
    "disclosed",
    "receiving party",
    "disclosing party",
];

/// Dispute resolution keywords
const DISPUTE_RESOLUTION_KEYWORDS: &[&str] = &[
    "dispute",
    "disputes",
    "arbitration",
    "arbitrator",
    "mediation",
    "mediator",
    "binding arbitration",
    "settle",
    "settlement",
];

/// Governing law and venue keywords
const JURISDICTION_KEYWORDS: &[&str] = &[
    "jurisdiction",
    "governing law",
    "governed by",
    "venue",
    "courts of",
    "exclusive jurisdiction",
    "applicable law",
];

/// Label assigned when no lexicon matches, and appended as the
/// residual mass when some do.
const FALLBACK_LABEL: &str = "other";

lazy_static! {
    static ref LEXICON: Vec<(&'static str, RegexSet)> = vec![
        ("termination", compile(TERMINATION_KEYWORDS)),
        ("confidentiality", compile(CONFIDENTIALITY_KEYWORDS)),
        ("dispute_resolution", compile(DISPUTE_RESOLUTION_KEYWORDS)),
        ("jurisdiction", compile(JURISDICTION_KEYWORDS)),
    ];
}

fn compile(keywords: &[&str]) -> RegexSet {
    let patterns: Vec<String> = keywords
        .iter()
        .map(|k| format!(r"(?i)\b{}\b", regex::escape(k)))
        .collect();
    RegexSet::new(&patterns).expect("lexicon keywords compile to valid patterns")
}

/// Deterministic lexicon classifier over the built-in clause labels.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl ClauseClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Result<Vec<Prediction>, AnalyzeError> {
        let hits: Vec<(&str, usize)> = LEXICON
            .iter()
            .map(|(label, set)| (*label, set.matches(text).iter().count()))
            .collect();
        let total: usize = hits.iter().map(|(_, n)| n).sum();

        if total == 0 {
            return Ok(vec![Prediction {
                label: FALLBACK_LABEL.to_string(),
                confidence: 0.5,
            }]);
        }

        // One pseudo-count keeps a residual share for "other" so no
        // single-keyword match claims full confidence.
        let denom = (total + 1) as f64;
        let mut predictions: Vec<Prediction> = hits
            .into_iter()
            .filter(|(_, n)| *n > 0)
            .map(|(label, n)| Prediction {
                label: label.to_string(),
                confidence: n as f64 / denom,
            })
            .collect();
        predictions.push(Prediction {
            label: FALLBACK_LABEL.to_string(),
            confidence: 1.0 / denom,
        });

        // Stable sort: equal-confidence labels keep lexicon order
        predictions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::trace!(top = %predictions[0].label, "classified clause");
        Ok(predictions)
    }
}
