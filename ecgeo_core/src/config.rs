//! Analysis configuration via TOML files.
//!
//! ```toml
//! [relatedness]
//! input_type = "Export"
//! method = "Symmetric"
//!
//! [complexity]
//! input_type = "RCA"
//! method = "Reflection"
//! steps = 18
//!
//! [logging]
//! index_log = "logs/indices.jsonl"
//! ```
//!
//! Every section and key is optional.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::complexity::{ComplexityMethod, MAX_REFLECTION_STEPS};
use crate::rca::InputType;
use crate::relatedness::RelatednessMethod;

/// Full analysis configuration.
///
/// # Examples
///
/// ```
/// use ecgeo_core::AnalysisConfig;
///
/// let config = AnalysisConfig::load_from_file("config/analysis.toml")
///     .unwrap_or_else(|_| AnalysisConfig::default());
///
/// println!("complexity method: {}", config.complexity.method);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisConfig {
    pub relatedness: RelatednessConfig,
    pub complexity: ComplexityConfig,
    pub logging: LoggingConfig,
}

impl AnalysisConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawAnalysisConfig =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;

        Ok(Self {
            relatedness: RelatednessConfig::try_from(&raw.relatedness)?,
            complexity: ComplexityConfig::try_from(&raw.complexity)?,
            logging: LoggingConfig::from(raw.logging),
        })
    }
}

/// How relatedness matrices are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelatednessConfig {
    pub input_type: InputType,
    pub method: RelatednessMethod,
}

impl Default for RelatednessConfig {
    fn default() -> Self {
        Self {
            input_type: InputType::Export,
            method: RelatednessMethod::Symmetric,
        }
    }
}

impl RelatednessConfig {
    fn try_from(raw: &RawRelatedness) -> Result<Self, ConfigError> {
        Ok(Self {
            input_type: parse_token("relatedness.input_type", &raw.input_type)?,
            method: parse_token("relatedness.method", &raw.method)?,
        })
    }
}

/// How complexity indices are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplexityConfig {
    pub input_type: InputType,
    pub method: ComplexityMethod,
    /// Reflection steps; unused by the eigenvector method.
    pub steps: usize,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            input_type: InputType::Export,
            method: ComplexityMethod::Reflection,
            steps: default_steps(),
        }
    }
}

impl ComplexityConfig {
    fn try_from(raw: &RawComplexity) -> Result<Self, ConfigError> {
        if raw.steps > MAX_REFLECTION_STEPS {
            return Err(ConfigError::Parse(format!(
                "complexity.steps must be ≤ {}",
                MAX_REFLECTION_STEPS
            )));
        }

        Ok(Self {
            input_type: parse_token("complexity.input_type", &raw.input_type)?,
            method: parse_token("complexity.method", &raw.method)?,
            steps: raw.steps,
        })
    }

    /// Steps to pass to the dispatcher: only the reflection method takes them.
    pub fn steps_for_method(&self) -> Option<usize> {
        match self.method {
            ComplexityMethod::Reflection => Some(self.steps),
            ComplexityMethod::Eigenvector => None,
        }
    }
}

/// Optional JSON-line log of computed indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
    pub index_log: Option<PathBuf>,
}

impl From<RawLogging> for LoggingConfig {
    fn from(raw: RawLogging) -> Self {
        Self {
            index_log: raw.index_log.map(PathBuf::from),
        }
    }
}

fn parse_token<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(value).map_err(|err| ConfigError::Parse(format!("{}: {}", key, err)))
}

#[derive(Debug, Deserialize)]
struct RawAnalysisConfig {
    #[serde(default)]
    relatedness: RawRelatedness,
    #[serde(default)]
    complexity: RawComplexity,
    #[serde(default)]
    logging: RawLogging,
}

#[derive(Debug, Deserialize)]
struct RawRelatedness {
    #[serde(default = "default_input_type")]
    input_type: String,
    #[serde(default = "default_relatedness_method")]
    method: String,
}

impl Default for RawRelatedness {
    fn default() -> Self {
        Self {
            input_type: default_input_type(),
            method: default_relatedness_method(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawComplexity {
    #[serde(default = "default_input_type")]
    input_type: String,
    #[serde(default = "default_complexity_method")]
    method: String,
    #[serde(default = "default_steps")]
    steps: usize,
}

impl Default for RawComplexity {
    fn default() -> Self {
        Self {
            input_type: default_input_type(),
            method: default_complexity_method(),
            steps: default_steps(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawLogging {
    #[serde(default)]
    index_log: Option<String>,
}

fn default_input_type() -> String {
    "Export".to_string()
}

fn default_relatedness_method() -> String {
    "Symmetric".to_string()
}

fn default_complexity_method() -> String {
    "Reflection".to_string()
}

fn default_steps() -> usize {
    18
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_sections_missing() {
        let config = AnalysisConfig::from_str("").unwrap();
        assert_eq!(config.relatedness, RelatednessConfig::default());
        assert_eq!(config.complexity.input_type, InputType::Export);
        assert_eq!(config.complexity.method, ComplexityMethod::Reflection);
        assert_eq!(config.complexity.steps, 18);
        assert!(config.logging.index_log.is_none());
    }

    #[test]
    fn parses_custom_values() {
        let toml = "[relatedness]\ninput_type = \"RCA\"\nmethod = \"Steijn\"\n\n[complexity]\nmethod = \"Eigenvector\"\nsteps = 4\n\n[logging]\nindex_log = \"out/indices.jsonl\"";
        let config = AnalysisConfig::from_str(toml).unwrap();
        assert_eq!(config.relatedness.input_type, InputType::Rca);
        assert_eq!(config.relatedness.method, RelatednessMethod::Steijn);
        assert_eq!(config.complexity.method, ComplexityMethod::Eigenvector);
        assert_eq!(config.complexity.steps, 4);
        assert_eq!(config.complexity.steps_for_method(), None);
        assert_eq!(
            config.logging.index_log,
            Some(PathBuf::from("out/indices.jsonl"))
        );
    }

    #[test]
    fn rejects_unknown_tokens() {
        let err = AnalysisConfig::from_str("[relatedness]\nmethod = \"Pearson\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ref msg) if msg.contains("relatedness.method")));
    }

    #[test]
    fn rejects_excess_steps() {
        let err = AnalysisConfig::from_str("[complexity]\nsteps = 30").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(AnalysisConfig::from_str("[complexity]\nsteps = -1").is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AnalysisConfig::load_from_file("/nonexistent/analysis.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
