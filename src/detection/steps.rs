use crate::pipeline::{PipelineStep, PipelineContext};
use crate::detection::preprocessing;
use anyhow::Result;
use image::DynamicImage;

/// Enlarge the image so small print survives recognition
pub struct UpscaleStep {
    pub factor: u32,
}

impl PipelineStep for UpscaleStep {
    fn process(&self, image: DynamicImage, _context: &PipelineContext) -> Result<DynamicImage> {
        Ok(preprocessing::upscale(&image, self.factor))
    }

    fn name(&self) -> &str {
        "Upscale"
    }
}

/// Convert image to grayscale
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(&self, image: DynamicImage, _context: &PipelineContext) -> Result<DynamicImage> {
        Ok(DynamicImage::ImageLuma8(preprocessing::to_grayscale(&image)))
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Locally-thresholded binarization
pub struct AdaptiveThresholdStep {
    pub block_size: u32,
    pub offset: i32,
}

impl PipelineStep for AdaptiveThresholdStep {
    fn process(&self, image: DynamicImage, _context: &PipelineContext) -> Result<DynamicImage> {
        if self.block_size < 3 || self.block_size % 2 == 0 {
            anyhow::bail!("Adaptive threshold block size must be odd and >= 3, got {}", self.block_size);
        }
        let gray = image.to_luma8();
        let binary = preprocessing::adaptive_threshold(&gray, self.block_size, self.offset);
        Ok(DynamicImage::ImageLuma8(binary))
    }

    fn name(&self) -> &str {
        "Adaptive Threshold"
    }
}
