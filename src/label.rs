use image::DynamicImage;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ParserConfig;
use crate::detection::{build_standard_pipeline, OcrsRecognizer, WordRecognizer};
use crate::error::{LabelError, Result};
use crate::models::{Carrier, OcrWord, ParseResult};
use crate::parsing::{
    aggregate, classify_lines, contains_tracking, detect_carrier, extract_tracking,
    normalize_lines, reconstruct_lines, GazetteerRecognizer, PersonNameRecognizer,
};
use crate::pipeline::Pipeline;

/// Turns shipping label images into sender, receiver and tracking fields.
///
/// Holds only read-only state, so one parser can be shared by every worker
/// in a batch.
pub struct LabelParser {
    config: ParserConfig,
    preprocessor: Pipeline,
    recognizer: Arc<dyn WordRecognizer>,
    names: Arc<dyn PersonNameRecognizer>,
}

impl LabelParser {
    pub fn new(
        config: ParserConfig,
        recognizer: Arc<dyn WordRecognizer>,
        names: Arc<dyn PersonNameRecognizer>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            preprocessor: build_standard_pipeline(&config),
            config,
            recognizer,
            names,
        })
    }

    /// Parser using the `ocrs` engine and the gazetteer name recognizer
    /// configured by `config`
    pub fn from_config(config: ParserConfig) -> Result<Self> {
        let recognizer = Arc::new(OcrsRecognizer::new(config.resolved_model_dir()?));
        let names: Arc<dyn PersonNameRecognizer> = match &config.names_file {
            Some(path) => Arc::new(GazetteerRecognizer::with_names_file(path)?),
            None => GazetteerRecognizer::shared(),
        };
        Self::new(config, recognizer, names)
    }

    /// Replace the preprocessing pipeline (for example one with debug output)
    pub fn with_preprocessor(mut self, preprocessor: Pipeline) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn preprocessor(&self) -> &Pipeline {
        &self.preprocessor
    }

    /// Decode raw image bytes and parse the label
    pub fn parse_label(&self, image_bytes: &[u8]) -> Result<ParseResult> {
        self.parse_label_named(image_bytes, "label")
    }

    /// Like [`LabelParser::parse_label`], naming the label in logs and debug output
    pub fn parse_label_named(&self, image_bytes: &[u8], label: &str) -> Result<ParseResult> {
        let image = image::load_from_memory(image_bytes)?;
        self.parse_image(&image, label)
    }

    pub fn parse_image(&self, image: &DynamicImage, label: &str) -> Result<ParseResult> {
        info!(label, width = image.width(), height = image.height(), "Parsing label");

        let binary = self
            .preprocessor
            .run(image.clone(), label)
            .map_err(|e| LabelError::Ocr(format!("preprocessing failed: {:#}", e)))?;
        let words = self.recognizer.recognize(&binary)?;

        let result = self.parse_words(&words)?;
        info!(
            label,
            has_sender = !result.sender_address.is_empty(),
            has_receiver = !result.receiver_address.is_empty(),
            has_tracking = !result.tracking_id.is_empty(),
            "Label parsed"
        );
        Ok(result)
    }

    /// Interpret OCR words: rebuild lines, normalize them, then interpret
    pub fn parse_words(&self, words: &[OcrWord]) -> Result<ParseResult> {
        let lines = reconstruct_lines(words, self.config.line_gap_px, self.config.min_confidence);
        debug!(words = words.len(), lines = lines.len(), "lines reconstructed");
        self.interpret(&normalize_lines(&lines))
    }

    /// Interpret normalized lines, detecting the carrier from them
    pub fn interpret(&self, lines: &[String]) -> Result<ParseResult> {
        let carrier = detect_carrier(lines);
        debug!(carrier = %carrier, "carrier detected");
        self.interpret_for_carrier(lines, carrier)
    }

    /// Interpret normalized lines for a known carrier
    pub fn interpret_for_carrier(&self, lines: &[String], carrier: Carrier) -> Result<ParseResult> {
        let tracking_id = extract_tracking(carrier, lines).unwrap_or_default();

        let address_lines: Vec<String> = lines
            .iter()
            .filter(|line| !contains_tracking(line, &tracking_id))
            .cloned()
            .collect();

        let (sender, receiver) = classify_lines(&address_lines, self.names.as_ref())?;

        Ok(aggregate(&sender, &receiver, &tracking_id, &self.config.address_delimiter))
    }
}
