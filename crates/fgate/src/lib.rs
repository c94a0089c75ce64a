//! Facade crate for FeatureGate.
//! Re-exports the domain, kernel and resolver crates and turns declarative
//! manifests into resolved reports.
//!
//! ## Usage
//! ```rust
//! use fgate::{Order, resolve_manifest};
//! use fgate::domain::GateConfig;
//!
//! let manifest: GateConfig = serde_json::from_str(r#"{
//!     "flags": ["server"],
//!     "features": [
//!         { "id": "db", "dependencies": [{ "kind": "flag", "flag": "server" }] },
//!         { "id": "api", "dependencies": [{ "kind": "feature", "target": "db" }] }
//!     ]
//! }"#).unwrap();
//!
//! let report = resolve_manifest(&manifest).unwrap();
//! assert!(report.is_success());
//! assert_eq!(report.outcomes(Order::Reversed)[0].id.as_str(), "api");
//! ```

mod error;
mod plugin;
mod report;
mod validate;

pub use error::{ManifestError, ManifestErrorExt, Result};
pub use fgate_domain as domain;
pub use fgate_kernel as kernel;
pub use fgate_resolver as resolver;
pub use plugin::{Manifest, Plugin};
pub use report::{Explanation, Order, Outcome, Report, ReportView};
pub use validate::validate;

use fgate_domain::{GateConfig, LoggingConfig};
use std::path::Path;
use tracing::info;

/// Loads a manifest file, applying `FGATE__` environment overrides.
///
/// # Errors
/// Returns [`ManifestError::Config`] when the file is missing or malformed.
pub fn load(path: impl AsRef<Path>) -> Result<GateConfig> {
    let path = path.as_ref();
    let config = fgate_kernel::config::load_manifest(path).context(format!("manifest {}", path.display()))?;
    Ok(config)
}

/// Loads only the manifest's `[logging]` table, applying `FGATE__` environment overrides.
///
/// # Errors
/// Returns [`ManifestError::Config`] when the file is missing or `[logging]` is malformed.
pub fn load_logging(path: impl AsRef<Path>) -> Result<LoggingConfig> {
    let path = path.as_ref();
    let logging = fgate_kernel::config::load_logging(path).context(format!("manifest {}", path.display()))?;
    Ok(logging)
}

/// Validates the manifest, then resolves every non-active feature against the active ones.
///
/// # Errors
/// Returns the first validation failure; resolution itself never fails.
pub fn resolve_manifest(config: &GateConfig) -> Result<Report> {
    validate(config)?;

    let (active, mut plugins): (Vec<Plugin>, Vec<Plugin>) = config.plugins().into_iter().partition(Plugin::is_active);
    info!(features = plugins.len(), active = active.len(), flags = config.flags.len(), "resolving manifest");

    let resolution = fgate_resolver::resolve(&mut plugins, &active, &config.flags);
    Ok(Report::new(resolution, plugins, active))
}
