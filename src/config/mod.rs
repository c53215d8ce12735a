//! Configuration management for cardiee.
//!
//! This module handles loading configuration from `~/.cardiee/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, StudyConfig};
