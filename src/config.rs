use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub artifacts: ArtifactSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Locations of the trained model and the reference dataset
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactSettings {
    pub model_path: String,
    pub reference_path: String,
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PRICE__)
    /// 5. `MODEL_PATH` / `REFERENCE_DATA_PATH` shortcuts
    pub fn load() -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PRICE__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("server.workers", 1)?
        .set_default("artifacts.model_path", "data/sgd_regressor_model.json")?
        .set_default("artifacts.reference_path", "data/regression_mobile_price.csv")
}

fn environment() -> Environment {
    Environment::with_prefix("PRICE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply the short artifact path variables on top of the layered config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(model_path) = env::var("MODEL_PATH") {
        builder = builder.set_override("artifacts.model_path", model_path)?;
    }
    if let Ok(reference_path) = env::var("REFERENCE_DATA_PATH") {
        builder = builder.set_override("artifacts.reference_path", reference_path)?;
    }

    builder.build()
}
