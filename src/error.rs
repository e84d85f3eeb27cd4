use thiserror::Error;

/// Failure while processing a single label.
///
/// Every variant is local to one label; a batch keeps going when one label
/// fails.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("OCR engine error: {0}")]
    Ocr(String),
    #[error("entity recognition error: {0}")]
    EntityRecognition(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("worker failed: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, LabelError>;
