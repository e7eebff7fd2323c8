use crate::core::ConfigProvider;
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub export: ExportConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_file_name() -> String {
    "roster.json".to_string()
}

fn default_output_dir() -> String {
    "./exports".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

const LOG_FORMATS: [&str; 2] = ["compact", "json"];
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl RosterConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RosterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Like [`RosterConfig::from_file`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    ///
    /// Substitution runs on the raw text before TOML parsing, so a variable
    /// may appear anywhere a string value can.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        // Match ${VAR_NAME} patterns
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RosterError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            // Unset variables keep their placeholder
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Checks paths, the snapshot file extension and the logging section.
    pub fn validate_config(&self) -> Result<()> {
        // Store paths
        validation::validate_path("store.data_dir", &self.store.data_dir)?;
        validation::validate_path("store.file_name", &self.store.file_name)?;
        validation::validate_file_extensions(
            "store.file_name",
            std::slice::from_ref(&self.store.file_name),
            &["json"],
        )?;

        // Export paths
        validation::validate_path("export.output_dir", &self.export.output_dir)?;

        if let Some(logging) = &self.logging {
            // Logging level, used as the `roster_admin=<level>` filter directive
            if let Some(level) = &logging.level {
                validation::validate_non_empty_string("logging.level", level)?;
                if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                    return Err(RosterError::InvalidConfigValueError {
                        field: "logging.level".to_string(),
                        value: level.clone(),
                        reason: format!(
                            "Unsupported level. Valid levels: {}",
                            LOG_LEVELS.join(", ")
                        ),
                    });
                }
            }
            if let Some(format) = &logging.format {
                if !LOG_FORMATS.contains(&format.as_str()) {
                    return Err(RosterError::InvalidConfigValueError {
                        field: "logging.format".to_string(),
                        value: format.clone(),
                        reason: format!(
                            "Unsupported format. Valid formats: {}",
                            LOG_FORMATS.join(", ")
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .is_some_and(|f| f == "json")
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl ConfigProvider for RosterConfig {
    fn data_dir(&self) -> &str {
        &self.store.data_dir
    }

    fn store_file(&self) -> &str {
        &self.store.file_name
    }

    fn export_dir(&self) -> &str {
        &self.export.output_dir
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
