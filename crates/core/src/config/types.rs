use std::path::PathBuf;

use serde::Deserialize;

use crate::dates::{
    DEFAULT_DISPLAY_FORMAT, DEFAULT_INPUT_FORMAT, DEFAULT_SCHEDULE_FORMAT, DateFormats,
};

/// Default location for generated documents, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "output/out.pdf";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub dates: DatesConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DatesConfig {
    /// Format of `--date` values.
    #[serde(default = "default_input_format")]
    pub input_format: String,
    /// Format of the `DATE` template variable.
    #[serde(default = "default_display_format")]
    pub display_format: String,
    /// How the default target date (next Sunday) is spelled for lookup.
    #[serde(default = "default_schedule_format")]
    pub schedule_format: String,
}

impl Default for DatesConfig {
    fn default() -> Self {
        Self {
            input_format: default_input_format(),
            display_format: default_display_format(),
            schedule_format: default_schedule_format(),
        }
    }
}

impl From<&DatesConfig> for DateFormats {
    fn from(cfg: &DatesConfig) -> Self {
        Self {
            input: cfg.input_format.clone(),
            display: cfg.display_format.clone(),
            schedule: cfg.schedule_format.clone(),
        }
    }
}

fn default_input_format() -> String {
    DEFAULT_INPUT_FORMAT.to_string()
}

fn default_display_format() -> String {
    DEFAULT_DISPLAY_FORMAT.to_string()
}

fn default_schedule_format() -> String {
    DEFAULT_SCHEDULE_FORMAT.to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: default_output_path() }
    }
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Config file that was read, if any.
    pub source: Option<PathBuf>,
    pub date_formats: DateFormats,
    pub output_path: PathBuf,
    pub logging: LoggingConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            source: None,
            date_formats: DateFormats::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            logging: LoggingConfig::default(),
        }
    }
}
