//! Contract clause extraction, classification, and PDF annotation
//!
//! This crate provides the core pipeline for the ClauseLens demo:
//! text block extraction from PDF and DOCX documents, a pluggable
//! clause classifier contract, a highlight annotation engine built on
//! lopdf, and an ordered clause report with CSV export.

pub mod annotate;
pub mod classify;
pub mod error;
pub mod extract;
pub mod report;
pub mod style;

pub use annotate::{analyze_docx, annotate_pdf, AnnotatedPdf};
pub use classify::{ClauseClassifier, Prediction};
pub use error::AnalyzeError;
pub use extract::{DocumentFormat, Rect, TextBlock, MIN_CLAUSE_LEN};
pub use report::{ClauseRecord, ClauseReport, LocationKind};
