//! Export configuration (lithophane.toml)
//!
//! ```toml
//! [quantize]
//! levels = 16
//! input_range = 256.0
//!
//! [relief]
//! base = 0.4
//! scale = 0.2
//!
//! [output]
//! path = "lithophane.stl"
//! format = "binary"   # or "ascii"
//! ```
//!
//! Every section and field is optional.

use anyhow::{Context, Result};
use litho_common::{Quantizer, ReliefConfig, StlFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub quantize: Quantizer,
    pub relief: ReliefConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub format: StlFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: StlFormat::Binary,
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("lithophane.stl")
}

/// Load and validate a configuration file
pub fn load_config(path: &Path) -> Result<ExportConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {:?}", path))?;
    let config = parse_config(&content)
        .with_context(|| format!("Invalid config: {:?}", path))?;
    Ok(config)
}

/// Parse and validate configuration text
pub fn parse_config(content: &str) -> Result<ExportConfig> {
    let config: ExportConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

impl ExportConfig {
    pub fn validate(&self) -> Result<()> {
        self.quantize.validate()?;
        self.relief.validate()?;
        if self.output.path.as_os_str().is_empty() {
            anyhow::bail!("Output path must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.quantize, Quantizer::default());
        assert_eq!(config.relief, ReliefConfig::default());
        assert_eq!(config.output.path, PathBuf::from("lithophane.stl"));
        assert_eq!(config.output.format, StlFormat::Binary);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r#"
            [relief]
            scale = 0.1

            [output]
            format = "ascii"
            "#,
        )
        .unwrap();

        assert_eq!(config.relief.scale, 0.1);
        assert_eq!(config.relief.base, 0.4);
        assert_eq!(config.quantize.levels, 16);
        assert_eq!(config.output.format, StlFormat::Ascii);
        assert_eq!(config.output.path, PathBuf::from("lithophane.stl"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse_config("[quantize]\nlevels = 1").is_err());
        assert!(parse_config("[relief]\nscale = -0.2").is_err());
        assert!(parse_config("[output]\nformat = \"obj\"").is_err());
        assert!(parse_config("[output]\npath = \"\"").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("no/such/lithophane.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
