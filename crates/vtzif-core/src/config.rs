use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::CoreError;

/// TZif versions the encoder can emit.
pub const SUPPORTED_TZIF_VERSIONS: [u8; 2] = [2, 3];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub template: TemplateConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// TZif format version written to stdout.
    pub version: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateConfig {
    /// Overrides the template name, which otherwise comes from the VTIMEZONE `TZID`.
    pub name: Option<String>,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `vtzif.toml` and `VTZIF_*` environment variables.
    /// Environment variables take precedence over the file.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or validating it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("logging.level", "warn")?
            .set_default("output.version", 2)?
            // TOML file
            .add_source(config::File::with_name("vtzif.toml").required(false))
            // Env vars
            .add_source(
                config::Environment::with_prefix("VTZIF")
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks values the deserializer cannot constrain on its own.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` for an unsupported TZif version.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !SUPPORTED_TZIF_VERSIONS.contains(&self.output.version) {
            return Err(CoreError::ConfigError(format!(
                "unsupported TZif version {} (expected one of {SUPPORTED_TZIF_VERSIONS:?})",
                self.output.version
            )));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "warn".to_string(),
            },
            output: OutputConfig { version: 2 },
            template: TemplateConfig::default(),
        }
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` and `vtzif.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
