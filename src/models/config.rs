use serde::Deserialize;

use crate::schedule::placement::GridConfig;

/// Minimum secret length accepted by cookie key derivation.
pub const MIN_SECRET_LEN: usize = 32;

/// Configuration options of the Classmate server.
///
/// Values are layered from `config/default.yaml`, `config/{APP_ENV}.yaml` and
/// `APP_*` environment variables (nested keys use `__`, for example
/// `APP_CALENDAR__START_HOUR`).
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Key material for signing flash message cookies.
    pub secret: String,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    #[serde(default)]
    pub calendar: GridConfig,
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

impl ServerConfig {
    /// Loads and checks the layered configuration.
    pub fn load() -> Result<Self, config::ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        let settings: Self = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), config::ConfigError> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(config::ConfigError::Message(format!(
                "secret must be at least {MIN_SECRET_LEN} bytes long"
            )));
        }
        self.calendar
            .check()
            .map_err(|e| config::ConfigError::Message(e.to_string()))
    }
}
