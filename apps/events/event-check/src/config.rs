//! Configuration for event-check

use clap::ValueEnum;
use core_config::{AppInfo, ConfigError, Environment, FromEnv, app_info, env_parse};
use strum::{Display, EnumString};

/// Output format of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Format {
    /// One JSON array on stdout
    #[default]
    Json,
    /// One human-readable block per document
    Pretty,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    /// Used when `--format` is not given (`EVENT_CHECK_FORMAT`)
    pub format: Format,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            format: env_parse("EVENT_CHECK_FORMAT", Format::default())?,
        })
    }
}
