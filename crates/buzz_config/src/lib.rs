use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::Path;
use tracing::debug;
pub mod models;
pub use models::*;


/// Environment variable prefix, e.g. `BUZZ__VENUE__BASE_URL`.
pub const ENV_PREFIX: &str = "BUZZ";

/// Loads the configuration from `CONFIG_DIR` (default `config`), the active
/// `RUN_ENV` overlay and `BUZZ__*` environment variables.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    // CONFIG_DIR may itself come from .env
    ensure_dotenv_loaded();
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    load_config_from(Path::new(&config_dir))
}

/// Same as [`load_config`] but reads the TOML files from `config_dir`.
///
/// The `.env` file is still loaded, so its `BUZZ__*` values apply.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "Loading config: default={} env={}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let config: AppConfig = builder.build()?.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

/// Rejects values the rest of the application cannot work with.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let venue = &config.venue;
    if venue.studio_count == 0 {
        return Err(ConfigError::Message(
            "venue.studio_count must be at least 1".to_string(),
        ));
    }
    if venue.slot_minutes == 0 || venue.slot_minutes > 24 * 60 {
        return Err(ConfigError::Message(format!(
            "venue.slot_minutes must be between 1 and 1440, got {}",
            venue.slot_minutes
        )));
    }
    if venue.timezone.parse::<Tz>().is_err() {
        return Err(ConfigError::Message(format!(
            "venue.timezone is not a known time zone: {}",
            venue.timezone
        )));
    }
    Ok(())
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the `.env` file into the process environment exactly once.
///
/// The path defaults to `.env` and can be overridden with `DOTENV_OVERRIDE`.
/// A missing file is not an error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
