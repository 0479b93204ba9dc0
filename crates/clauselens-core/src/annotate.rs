//! Document analysis and PDF highlight annotation
//!
//! The entry points here drive the whole pipeline: extract blocks,
//! classify each one, then (for PDF) write a highlight annotation per
//! clause. All blocks are classified before any annotation is written,
//! so a classification failure never produces a partially annotated
//! document.

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::classify::{ClauseClassifier, Prediction};
use crate::error::AnalyzeError;
use crate::extract::{self, Rect};
use crate::report::{ClauseRecord, ClauseReport, LocationKind};
use crate::style::{self, Rgb};

/// Author name stamped on every highlight annotation.
pub const ANNOTATION_TITLE: &str = "AI Clause Classification";

/// Result of annotating a PDF: the rewritten document plus the clause
/// report describing every highlight in it.
#[derive(Debug)]
pub struct AnnotatedPdf {
    pub pdf_bytes: Vec<u8>,
    pub report: ClauseReport,
}

/// Classify every qualifying block of a PDF and highlight each one.
pub fn annotate_pdf(
    bytes: &[u8],
    classifier: &dyn ClauseClassifier,
) -> Result<AnnotatedPdf, AnalyzeError> {
    let mut doc =
        Document::load_mem(bytes).map_err(|e| AnalyzeError::DocumentParse(e.to_string()))?;
    let blocks = extract::pdf::extract_blocks(&doc)?;
    let pages = doc.get_pages();

    let mut report = ClauseReport::new(LocationKind::Page);
    let mut highlights: Vec<(ObjectId, Rect, Rgb, String)> = Vec::new();

    for block in &blocks {
        let top = classify_block(classifier, &block.text)?;
        report.push(ClauseRecord::new(
            block.location,
            &block.text,
            &top.label,
            top.confidence,
        ));
        if let (Some(&page_id), Some(rect)) = (pages.get(&block.location), block.rect) {
            let contents = format!("{} ({:.2})", top.label.to_uppercase(), top.confidence);
            highlights.push((page_id, rect, style::color_for(&top.label), contents));
        }
    }

    tracing::debug!(clauses = report.len(), "classified PDF blocks");

    for (page_id, rect, color, contents) in highlights {
        add_highlight_annotation(&mut doc, page_id, &rect, color, &contents)?;
    }

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| AnalyzeError::DocumentParse(e.to_string()))?;

    Ok(AnnotatedPdf {
        pdf_bytes: output,
        report,
    })
}

/// Classify every qualifying paragraph of a DOCX. No annotation is
/// produced; the report is the whole result.
pub fn analyze_docx(
    bytes: &[u8],
    classifier: &dyn ClauseClassifier,
) -> Result<ClauseReport, AnalyzeError> {
    let blocks = extract::docx::extract_blocks(bytes)?;
    let mut report = ClauseReport::new(LocationKind::Paragraph);
    for block in &blocks {
        let top = classify_block(classifier, &block.text)?;
        report.push(ClauseRecord::new(
            block.location,
            &block.text,
            &top.label,
            top.confidence,
        ));
    }
    Ok(report)
}

/// Take the rank-0 prediction for a block.
fn classify_block(
    classifier: &dyn ClauseClassifier,
    text: &str,
) -> Result<Prediction, AnalyzeError> {
    let mut predictions = classifier.classify(text)?;
    if predictions.is_empty() {
        return Err(AnalyzeError::Classification(
            "classifier returned no predictions".to_string(),
        ));
    }
    Ok(predictions.remove(0))
}

fn add_highlight_annotation(
    doc: &mut Document,
    page_id: ObjectId,
    rect: &Rect,
    color: Rgb,
    contents: &str,
) -> Result<(), AnalyzeError> {
    let mut annot = Dictionary::new();
    annot.set("Type", Object::Name(b"Annot".to_vec()));
    annot.set("Subtype", Object::Name(b"Highlight".to_vec()));
    annot.set(
        "Rect",
        Object::Array(vec![
            Object::Real(rect.x0 as f32),
            Object::Real(rect.y0 as f32),
            Object::Real(rect.x1 as f32),
            Object::Real(rect.y1 as f32),
        ]),
    );
    // QuadPoints run top-left, top-right, bottom-left, bottom-right
    annot.set(
        "QuadPoints",
        Object::Array(vec![
            Object::Real(rect.x0 as f32),
            Object::Real(rect.y1 as f32),
            Object::Real(rect.x1 as f32),
            Object::Real(rect.y1 as f32),
            Object::Real(rect.x0 as f32),
            Object::Real(rect.y0 as f32),
            Object::Real(rect.x1 as f32),
            Object::Real(rect.y0 as f32),
        ]),
    );
    annot.set(
        "C",
        Object::Array(color.iter().map(|&c| Object::Real(c)).collect()),
    );
    annot.set(
        "T",
        Object::String(
            ANNOTATION_TITLE.as_bytes().to_vec(),
            lopdf::StringFormat::Literal,
        ),
    );
    annot.set(
        "Contents",
        Object::String(contents.as_bytes().to_vec(), lopdf::StringFormat::Literal),
    );

    let annot_id = doc.add_object(Object::Dictionary(annot));
    add_annotation_to_page(doc, page_id, annot_id)
}

fn add_annotation_to_page(
    doc: &mut Document,
    page_id: ObjectId,
    annot_id: ObjectId,
) -> Result<(), AnalyzeError> {
    let page = doc
        .get_object_mut(page_id)
        .map_err(|e| AnalyzeError::DocumentParse(e.to_string()))?;

    if let Object::Dictionary(ref mut page_dict) = page {
        if let Ok(Object::Array(ref mut arr)) = page_dict.get_mut(b"Annots") {
            arr.push(Object::Reference(annot_id));
        } else {
            page_dict.set("Annots", Object::Array(vec![Object::Reference(annot_id)]));
        }
    }
    Ok(())
}
