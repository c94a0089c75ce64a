use config::{Config, Environment, File};
use fgate_domain::{GateConfig, LoggingConfig};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix of environment variables overriding manifest values.
pub const ENV_PREFIX: &str = "FGATE";

/// Custom error type for config loading.
#[fgate_derive::fgate_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layers, lowest precedence first:
/// 1. **Base File**: the manifest at `path`. The format follows the extension (`.toml`, `.json`, ...);
///    without one, every supported extension is tried.
/// 2. **Environment Overrides**: variables prefixed with `FGATE__`. Nested keys use double
///    underscores (e.g. `FGATE__LOGGING__LEVEL` maps to `logging.level`).
///
/// # Errors
/// This function will return an error if:
/// * The configuration file cannot be found or parsed.
/// * The merged content does not match the structure of type `T`.
///
/// # Example
/// ```rust,no_run
/// use fgate_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct Limits {
///     max_rounds: u32,
/// }
///
/// let limits: Limits = load_config("limits.toml").unwrap_or_default();
/// ```
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();

    let builder = Config::builder().add_source(File::from(path).required(true)).add_source(
        Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake),
    );

    info!("Loading config from {}", path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Loads a feature manifest with [`load_config`].
///
/// # Errors
/// See [`load_config`].
pub fn load_manifest(path: impl AsRef<Path>) -> Result<GateConfig> {
    load_config::<GateConfig>(path)
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
    logging: LoggingConfig,
}

/// Loads only the `[logging]` table of a manifest, with the same layering as [`load_config`].
///
/// Binaries call this before installing a subscriber. The rest of the manifest
/// is not parsed, so malformed features do not prevent logging from starting.
///
/// # Errors
/// Fails when the file is missing or `[logging]` is malformed.
pub fn load_logging(path: impl AsRef<Path>) -> Result<LoggingConfig> {
    Ok(load_config::<LoggingSection>(path)?.logging)
}
