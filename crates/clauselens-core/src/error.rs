use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Failed to parse document: {0}")]
    DocumentParse(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Classification failed: {0}")]
    Classification(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
