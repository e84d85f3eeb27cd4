use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{LabelError, Result};

/// Tunables for one label parser. Every field has a default, so a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Vertical distance (px) at which a word starts a new line
    pub line_gap_px: i32,
    /// Words below this OCR confidence are dropped
    pub min_confidence: f32,
    /// Scale applied before binarization
    pub upscale_factor: u32,
    /// Side of the local neighborhood used by the adaptive threshold (odd)
    pub threshold_block_size: u32,
    /// Constant subtracted from the local mean
    pub threshold_offset: i32,
    /// Separator between lines of an address block
    pub address_delimiter: String,
    /// Directory holding `text-detection.rten` and `text-recognition.rten`
    pub model_dir: Option<PathBuf>,
    /// Newline-separated given names added to the built-in list
    pub names_file: Option<PathBuf>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            line_gap_px: 15,
            min_confidence: 60.0,
            upscale_factor: 2,
            threshold_block_size: 31,
            threshold_offset: 2,
            address_delimiter: "|".to_string(),
            model_dir: None,
            names_file: None,
        }
    }
}

impl ParserConfig {
    /// Load a config from a JSON file and validate it
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: ParserConfig = serde_json::from_str(&raw).map_err(|e| {
            LabelError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.upscale_factor == 0 {
            return Err(LabelError::Config(
                "upscale_factor must be greater than 0".to_string(),
            ));
        }
        if self.threshold_block_size < 3 || self.threshold_block_size % 2 == 0 {
            return Err(LabelError::Config(format!(
                "threshold_block_size must be odd and at least 3, got {}",
                self.threshold_block_size
            )));
        }
        if !(0.0..=100.0).contains(&self.min_confidence) {
            return Err(LabelError::Config(format!(
                "min_confidence must be within 0-100, got {}",
                self.min_confidence
            )));
        }
        if self.line_gap_px <= 0 {
            return Err(LabelError::Config(
                "line_gap_px must be greater than 0".to_string(),
            ));
        }
        if self.address_delimiter.is_empty() {
            return Err(LabelError::Config(
                "address_delimiter must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Model directory, falling back to the `ocrs` cache under the home directory
    pub fn resolved_model_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.model_dir {
            return Ok(dir.clone());
        }
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| {
                LabelError::Config("neither HOME nor USERPROFILE is set".to_string())
            })?;
        Ok(Path::new(&home_dir).join(".cache/ocrs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ParserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.line_gap_px, 15);
        assert_eq!(config.min_confidence, 60.0);
        assert_eq!(config.threshold_block_size, 31);
        assert_eq!(config.threshold_offset, 2);
        assert_eq!(config.address_delimiter, "|");
    }

    #[test]
    fn test_even_block_size_rejected() {
        let config = ParserConfig {
            threshold_block_size: 30,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LabelError::Config(_))));
    }

    #[test]
    fn test_partial_json_keeps_defaults() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{ "line_gap_px": 20, "address_delimiter": " / " }}"#)?;

        let config = ParserConfig::from_json_file(file.path())?;
        assert_eq!(config.line_gap_px, 20);
        assert_eq!(config.address_delimiter, " / ");
        assert_eq!(config.upscale_factor, 2);
        Ok(())
    }

    #[test]
    fn test_malformed_json_is_config_error() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "not json")?;

        let result = ParserConfig::from_json_file(file.path());
        assert!(matches!(result, Err(LabelError::Config(_))));
        Ok(())
    }
}
