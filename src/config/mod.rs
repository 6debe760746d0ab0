//! Configuration module for gridquery.
//!
//! Handles the TOML settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, LogFormat, LoggingSettings, Settings, SettingsError, TranslationSettings,
};
