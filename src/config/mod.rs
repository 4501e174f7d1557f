//! Settings resolution module

pub mod env;
pub mod resolver;
pub mod validation;

// Re-export main functionality
pub use env::EnvManager;
pub use resolver::{build_profile, display_settings_summary, load_settings, resolve_profile, SettingsResolver};
pub use validation::{validate_settings, SettingsValidator, ValidationLevel, ValidationWarning};

// Re-export from models for convenience
pub use crate::models::{Profile, Settings};
