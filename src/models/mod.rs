//! Data models for the settings resolver

pub mod settings;
pub mod value;

pub use settings::{keys, Profile, Settings};
pub use value::{RefreshInterval, SettingValue, TaskQueueConfig};
