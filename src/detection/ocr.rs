use image::DynamicImage;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams, TextItem};
use rten::Model;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::error::{LabelError, Result};
use crate::models::OcrWord;

/// Confidence reported for every word recognized by `ocrs`, which does not
/// score individual words
pub const OCRS_WORD_CONFIDENCE: f32 = 90.0;

/// OCR capability consumed by the label parser.
///
/// Implementations return words in the engine's reading order, each with a
/// 0-100 confidence and its bounding box's top/left pixel coordinates.
pub trait WordRecognizer: Send + Sync {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<OcrWord>>;
}

/// Initialize OCR engine with the detection and recognition models in `model_dir`
pub fn init_ocr_engine(model_dir: &Path) -> anyhow::Result<OcrEngine> {
    let detection_model_path = model_dir.join("text-detection.rten");
    let recognition_model_path = model_dir.join("text-recognition.rten");

    // Check if models exist
    if !detection_model_path.exists() || !recognition_model_path.exists() {
        anyhow::bail!(
            "OCR models not found. Please run: ocrs-cli --help (or download models manually)\n\
             Expected locations:\n  - {}\n  - {}",
            detection_model_path.display(),
            recognition_model_path.display()
        );
    }

    let detection_model = Model::load_file(&detection_model_path)?;
    let recognition_model = Model::load_file(&recognition_model_path)?;

    let engine = OcrEngine::new(OcrEngineParams {
        detection_model: Some(detection_model),
        recognition_model: Some(recognition_model),
        ..Default::default()
    })?;

    Ok(engine)
}

/// [`WordRecognizer`] backed by the `ocrs` engine
pub struct OcrsRecognizer {
    model_dir: PathBuf,
    // Loaded on first use; the Arc lets callers drop the lock before running OCR
    engine: Mutex<Option<Arc<OcrEngine>>>,
}

impl OcrsRecognizer {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            engine: Mutex::new(None),
        }
    }

    fn engine(&self) -> Result<Arc<OcrEngine>> {
        let mut engine_guard = self
            .engine
            .lock()
            .map_err(|_| LabelError::Ocr("OCR engine lock poisoned".to_string()))?;

        if let Some(engine) = engine_guard.as_ref() {
            return Ok(engine.clone());
        }

        info!(model_dir = %self.model_dir.display(), "Initializing OCR engine");
        let engine = Arc::new(
            init_ocr_engine(&self.model_dir).map_err(|e| LabelError::Ocr(format!("{:#}", e)))?,
        );
        *engine_guard = Some(engine.clone());
        info!("OCR engine initialized successfully");

        Ok(engine)
    }
}

impl WordRecognizer for OcrsRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<OcrWord>> {
        let engine = self.engine()?;

        let img = image.to_rgb8();
        let img_source = ImageSource::from_bytes(img.as_raw(), img.dimensions())
            .map_err(|e| LabelError::Ocr(format!("invalid OCR input: {}", e)))?;
        let ocr_input = engine
            .prepare_input(img_source)
            .map_err(|e| LabelError::Ocr(e.to_string()))?;

        let word_rects = engine
            .detect_words(&ocr_input)
            .map_err(|e| LabelError::Ocr(e.to_string()))?;
        let line_rects = engine.find_text_lines(&ocr_input, &word_rects);
        let line_texts = engine
            .recognize_text(&ocr_input, &line_rects)
            .map_err(|e| LabelError::Ocr(e.to_string()))?;

        let mut words = Vec::new();
        for line in line_texts.iter().flatten() {
            for word in line.words() {
                let rect = word.bounding_rect();
                words.push(OcrWord::new(
                    word.to_string(),
                    OCRS_WORD_CONFIDENCE,
                    rect.top(),
                    rect.left(),
                ));
            }
        }

        debug!(words = words.len(), "OCR finished");
        Ok(words)
    }
}
