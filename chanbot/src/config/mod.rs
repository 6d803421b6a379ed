//! Bot configuration: BaseConfig (identity, prefix, admins, log) + PluginsConfig (entry store, Wolfram|Alpha).

mod base;
mod bot_config;
mod plugin_config;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use plugin_config::PluginsConfig;
