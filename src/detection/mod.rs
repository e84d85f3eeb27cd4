pub mod preprocessing;
pub mod ocr;
pub mod steps;

pub use ocr::{OcrsRecognizer, WordRecognizer};

use crate::config::ParserConfig;
use crate::pipeline::Pipeline;

/// Build the standard label preprocessing pipeline:
/// upscale, grayscale, then adaptive binarization
pub fn build_standard_pipeline(config: &ParserConfig) -> Pipeline {
    use crate::detection::steps::*;
    use std::sync::Arc;

    Pipeline::new()
        .add_step(Arc::new(UpscaleStep { factor: config.upscale_factor }))
        .add_step(Arc::new(GrayscaleStep))
        .add_step(Arc::new(AdaptiveThresholdStep {
            block_size: config.threshold_block_size,
            offset: config.threshold_offset,
        }))
}
