use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::Result;
use tracing::debug;

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Context available to all pipeline steps
#[derive(Clone, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
}

impl PipelineContext {
    /// Directory receiving debug images for one label, if debug mode is on
    fn label_debug_dir(&self, label: &str) -> Option<PathBuf> {
        self.debug
            .as_ref()
            .map(|config| config.output_dir.join(sanitize_label(label)))
    }
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Transform one image into the next stage's image
    fn process(&self, image: DynamicImage, context: &PipelineContext) -> Result<DynamicImage>;

    /// Human-readable name for this step (used in logs and debug file names)
    fn name(&self) -> &str;
}

/// Composable image pipeline builder
#[derive(Clone)]
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext::default(),
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        // Check if directory exists and is empty
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig { output_dir });

        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Names of the configured steps, in execution order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run every step in order on one label's image.
    /// `label` names the debug subdirectory when debug mode is enabled.
    pub fn run(&self, input: DynamicImage, label: &str) -> Result<DynamicImage> {
        let debug_dir = self.context.label_debug_dir(label);
        if let Some(dir) = &debug_dir {
            std::fs::create_dir_all(dir)?;
            save_debug_image(&input, dir, "00_input.png")?;
        }

        let mut image = input;
        for (step_idx, step) in self.steps.iter().enumerate() {
            let step_name = step.name();
            debug!(label, step = step_name, "running pipeline step");

            image = step.process(image, &self.context)?;

            if let Some(dir) = &debug_dir {
                let filename = format!("{:02}_{}.png", step_idx + 1,
                    step_name.to_lowercase().replace(' ', "_"));
                save_debug_image(&image, dir, &filename)?;
            }

            debug!(label, step = step_name, width = image.width(), height = image.height(),
                "pipeline step finished");
        }

        Ok(image)
    }

}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn save_debug_image(image: &DynamicImage, dir: &Path, filename: &str) -> Result<()> {
    let output_path = dir.join(filename);
    image.save(&output_path)
        .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
    debug!(path = %output_path.display(), "saved debug image");
    Ok(())
}

/// Keep debug subdirectory names to a single path component
fn sanitize_label(label: &str) -> String {
    let cleaned: String = label
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "label".to_string()
    } else {
        cleaned
    }
}
