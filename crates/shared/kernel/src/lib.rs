//! Kernel utilities shared by the FeatureGate binaries.
//! Keep this crate lightweight; it owns layered config loading and re-exports the domain types.
//!
//! ## Config loading
//! ```rust,no_run
//! use fgate_kernel::config::load_manifest;
//!
//! let manifest = load_manifest("features.toml").unwrap();
//! println!("{} features declared", manifest.features.len());
//! ```
pub mod config;

pub use fgate_domain as domain;
