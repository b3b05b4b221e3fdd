//! Configuration: `.codescoutrc` loading with silent fallback to defaults.

mod loader;
mod types;

pub use loader::{CONFIG_FILENAME, load_config};
pub use types::{OutputConfig, ScoutConfig, VALID_PROVIDERS, normalize_provider};
