//! Editor configuration file support
//!
//! Handles parsing of `.dmn-editor.toml` configuration files and
//! environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::export::DMN_11_NAMESPACE;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".dmn-editor.toml";

/// Environment variable for the namespace written on `definitions`
pub const ENV_SCHEMA_NAMESPACE: &str = "DMN_EDITOR_SCHEMA_NAMESPACE";

/// Environment variable enabling strict expression conversion
pub const ENV_STRICT_EXPRESSIONS: &str = "DMN_EDITOR_STRICT_EXPRESSIONS";

/// Environment variable enabling graph structure checks before marshalling
pub const ENV_VALIDATE_STRUCTURE: &str = "DMN_EDITOR_VALIDATE_STRUCTURE";

/// Error reading or writing configuration
#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Config parse error: {0}")]
    ParseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Marshaller configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarshallerSection {
    /// Default namespace written on the `definitions` element
    #[serde(default = "default_schema_namespace")]
    pub schema_namespace: String,

    /// Abort on nested expressions of unsupported kinds instead of dropping them
    #[serde(default)]
    pub strict_expressions: bool,

    /// Check graph containment and requirement edges before marshalling
    #[serde(default = "default_validate_structure")]
    pub validate_structure: bool,
}

fn default_schema_namespace() -> String {
    DMN_11_NAMESPACE.to_string()
}

fn default_validate_structure() -> bool {
    true
}

impl Default for MarshallerSection {
    fn default() -> Self {
        Self {
            schema_namespace: default_schema_namespace(),
            strict_expressions: false,
            validate_structure: default_validate_structure(),
        }
    }
}

/// Default cell texts used by structural edit commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsSection {
    /// Text of input entries created by new input clauses and rules
    #[serde(default = "default_input_entry")]
    pub input_entry: String,

    /// Text of output entries created by new output clauses and rules
    #[serde(default = "default_output_entry")]
    pub output_entry: String,

    /// Description of new rules
    #[serde(default = "default_rule_description")]
    pub rule_description: String,

    /// Text of cells created by new relation rows and columns
    #[serde(default)]
    pub relation_cell: String,

    /// Caption shown for a context entry without a variable
    #[serde(default = "default_context_row_caption")]
    pub context_row_caption: String,
}

fn default_input_entry() -> String {
    "unary test".to_string()
}

fn default_output_entry() -> String {
    "literal expression".to_string()
}

fn default_rule_description() -> String {
    "A rule".to_string()
}

fn default_context_row_caption() -> String {
    "default".to_string()
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            input_entry: default_input_entry(),
            output_entry: default_output_entry(),
            rule_description: default_rule_description(),
            relation_cell: String::new(),
            context_row_caption: default_context_row_caption(),
        }
    }
}

/// Main configuration structure
///
/// Represents the `.dmn-editor.toml` configuration file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EditorConfig {
    /// Marshaller configuration
    #[serde(default)]
    pub marshaller: MarshallerSection,

    /// Default texts for new cells
    #[serde(default)]
    pub defaults: DefaultsSection,
}

impl EditorConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a directory
    ///
    /// Looks for `.dmn-editor.toml` in `dir`, falls back to defaults if it
    /// is missing, then applies environment overrides.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(format!("Failed to read config: {}", e)))?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a directory
    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        std::fs::write(dir.join(CONFIG_FILENAME), content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(namespace) = lookup(ENV_SCHEMA_NAMESPACE) {
            self.marshaller.schema_namespace = namespace;
        }

        if let Some(strict) = lookup(ENV_STRICT_EXPRESSIONS)
            && let Some(strict) = parse_flag(&strict)
        {
            self.marshaller.strict_expressions = strict;
        }

        if let Some(validate) = lookup(ENV_VALIDATE_STRUCTURE)
            && let Some(validate) = parse_flag(&validate)
        {
            self.marshaller.validate_structure = validate;
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# DMN editor configuration

[marshaller]
# Default namespace written on <definitions>
schema_namespace = "http://www.omg.org/spec/DMN/20151101/dmn.xsd"

# Fail on nested expressions of unsupported kinds instead of dropping them
strict_expressions = false

# Check graph containment and requirement edges before marshalling
validate_structure = true

[defaults]
input_entry = "unary test"
output_entry = "literal expression"
rule_description = "A rule"
relation_cell = ""
context_row_caption = "default"
"#
}
