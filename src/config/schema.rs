//! Configuration schema types for `tokensrc.toml`
//!
//! Every section and field is optional; an empty file is a valid config.

use serde::{Deserialize, Serialize};

use crate::codegen::CodegenOptions;

/// Log verbosity used when `RUST_LOG` is not set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive string for an env filter
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// JSON output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty print JSON (with indentation)
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

fn default_true() -> bool {
    true
}

/// TypeScript generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Spaces per nesting level (1-8)
    #[serde(default = "default_indent")]
    pub indent: usize,
    /// Append `as const` to declarations
    #[serde(default = "default_true")]
    pub as_const: bool,
    /// Prefix for exported names
    #[serde(default)]
    pub export_prefix: String,
}

fn default_indent() -> usize {
    2
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self { indent: default_indent(), as_const: true, export_prefix: String::new() }
    }
}

impl From<&CodegenConfig> for CodegenOptions {
    fn from(config: &CodegenConfig) -> Self {
        Self {
            indent: config.indent,
            as_const: config.as_const,
            export_prefix: config.export_prefix.clone(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
}

/// Root of `tokensrc.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokensrcConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub codegen: CodegenConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "codegen.indent")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tokensrc.toml: '{}' {}", self.field, self.message)
    }
}

impl TokensrcConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if !(1..=8).contains(&self.codegen.indent) {
            errors.push(ConfigValidationError {
                field: "codegen.indent".to_string(),
                message: "must be between 1 and 8".to_string(),
            });
        }

        let prefix = &self.codegen.export_prefix;
        let valid_prefix = prefix.chars().enumerate().all(|(i, c)| {
            c.is_ascii_alphabetic() || c == '_' || c == '$' || (i > 0 && c.is_ascii_digit())
        });
        if !valid_prefix {
            errors.push(ConfigValidationError {
                field: "codegen.export_prefix".to_string(),
                message: "must be a valid identifier prefix".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
