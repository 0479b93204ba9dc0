//! Text block extraction
//!
//! Turns raw document bytes into a sequence of [`TextBlock`]s in
//! document order. PDF blocks carry a bounding rectangle; DOCX
//! paragraphs have no geometry.

pub mod docx;
pub mod pdf;

use serde::Serialize;

use crate::error::AnalyzeError;

/// Minimum clause length in characters, after trimming whitespace.
/// Shorter blocks are dropped: they produce no record and no highlight.
pub const MIN_CLAUSE_LEN: usize = 30;

/// Supported input formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolve a declared MIME type to a format.
    pub fn from_mime(mime: &str) -> Result<Self, AnalyzeError> {
        match mime {
            "application/pdf" => Ok(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Ok(Self::Docx)
            }
            other => Err(AnalyzeError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Axis-aligned rectangle in PDF user-space points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// A contiguous text segment with its document location.
///
/// `location` is 1-based: the page number for PDF, the paragraph number
/// for DOCX. `rect` is present only for page-based formats.
#[derive(Clone, Debug)]
pub struct TextBlock {
    pub location: u32,
    pub rect: Option<Rect>,
    pub text: String,
}

impl TextBlock {
    /// Whether the block is long enough to be considered a clause.
    pub fn qualifies(&self) -> bool {
        self.text.trim().chars().count() >= MIN_CLAUSE_LEN
    }
}

/// Extract qualifying text blocks from document bytes.
pub fn extract_blocks(
    bytes: &[u8],
    format: DocumentFormat,
) -> Result<Vec<TextBlock>, AnalyzeError> {
    match format {
        DocumentFormat::Pdf => {
            let doc = lopdf::Document::load_mem(bytes)
                .map_err(|e| AnalyzeError::DocumentParse(e.to_string()))?;
            pdf::extract_blocks(&doc)
        }
        DocumentFormat::Docx => docx::extract_blocks(bytes),
    }
}
