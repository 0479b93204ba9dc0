//! Classifier contract
//!
//! The classifier is an external collaborator: anything that maps a
//! clause text to a ranked list of (label, confidence) pairs can sit
//! behind this trait, whether a local lexicon or a remote inference
//! service.

use serde::Serialize;

use crate::error::AnalyzeError;

/// A single (label, confidence) pair returned by a classifier.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    /// Probability-like score in [0, 1]
    pub confidence: f64,
}

/// A pluggable clause classifier.
///
/// Implementations must return a non-empty list sorted descending by
/// confidence. The first entry is taken as the winning label; when
/// several labels share the top confidence, the classifier's own
/// ordering is authoritative.
pub trait ClauseClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Vec<Prediction>, AnalyzeError>;
}
