//! BotConfig: BaseConfig + PluginsConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, PluginsConfig};

/// Bot config: base settings plus plugin settings.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub plugins: PluginsConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `nick` is provided it overrides BOT_NICK.
    /// Call validate() after load to check config before init.
    pub fn load(nick: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(nick)?;
        let plugins = PluginsConfig::from_env()?;
        Ok(Self { base, plugins })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.plugins.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn plugins(&self) -> &PluginsConfig {
        &self.plugins
    }
    pub fn nick(&self) -> &str {
        &self.base.nick
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
}
