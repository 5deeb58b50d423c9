use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::{path::Path, sync::Arc};
use tracing::info;

use crate::error::ConfigError;

const DEFAULT_COMMAND_ERROR: &str = "&cAn unexpected error occurred while running this command.";
const DEFAULT_MISSING_PARAMETER_ERROR: &str = "&cMissing parameter: %s";
const DEFAULT_PARAMETER_ERROR: &str = "&cInvalid parameter: %s";
const DEFAULT_ENABLE_CACHE: bool = true;

/// Runtime configuration read by the interceptor, loaded from TOML.
///
/// ```toml
/// [messages]
/// command_error = "&cSomething went wrong"
/// missing_parameter_error = "&cMissing %s"
/// parameter_error = "&cBad %s"
///
/// [commands]
/// enable_cache = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterceptorConfig {
    /// Message templates sent on failures.
    #[serde(default)]
    pub messages: MessagesConfig,
    /// Parser behaviour.
    #[serde(default)]
    pub commands: CommandsConfig,
}

/// Templates for the messages sent when a recognized command fails. The two parameter templates
/// take the parameter's label in place of `%s`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagesConfig {
    #[serde(default = "default_command_error")]
    pub command_error: String,
    #[serde(default = "default_missing_parameter_error")]
    pub missing_parameter_error: String,
    #[serde(default = "default_parameter_error")]
    pub parameter_error: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        MessagesConfig {
            command_error: default_command_error(),
            missing_parameter_error: default_missing_parameter_error(),
            parameter_error: default_parameter_error(),
        }
    }
}

/// Parser cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandsConfig {
    /// Reuse the built parser between dispatches. When false the parser is rebuilt every time.
    #[serde(default = "default_enable_cache")]
    pub enable_cache: bool,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        CommandsConfig {
            enable_cache: default_enable_cache(),
        }
    }
}

fn default_command_error() -> String {
    DEFAULT_COMMAND_ERROR.to_owned()
}

fn default_missing_parameter_error() -> String {
    DEFAULT_MISSING_PARAMETER_ERROR.to_owned()
}

fn default_parameter_error() -> String {
    DEFAULT_PARAMETER_ERROR.to_owned()
}

fn default_enable_cache() -> bool {
    DEFAULT_ENABLE_CACHE
}

/// A value read from its source every time it is needed.
pub trait DynamicValue<T>: Send + Sync {
    /// Returns the current value.
    fn get(&self) -> T;
}

impl<T, F> DynamicValue<T> for F
where F: Fn() -> T + Send + Sync
{
    fn get(&self) -> T {
        self()
    }
}

/// Holds the current configuration and swaps it on reload.
#[derive(Debug, Default)]
pub struct ConfigStore {
    current: RwLock<InterceptorConfig>,
}

impl ConfigStore {
    /// Wraps an already loaded configuration.
    pub fn new(config: InterceptorConfig) -> Arc<Self> {
        Arc::new(ConfigStore {
            current: RwLock::new(config),
        })
    }

    /// Parses TOML text into a new store.
    pub fn from_toml_str(text: &str) -> Result<Arc<Self>, ConfigError> {
        Ok(Self::new(toml::from_str(text)?))
    }

    /// Reads a TOML file into a new store.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Arc<Self>, ConfigError> {
        Ok(Self::new(read_config(path.as_ref())?))
    }

    /// Replaces the configuration with the parsed text. On error the current configuration is
    /// kept.
    pub fn reload_from_str(&self, text: &str) -> Result<(), ConfigError> {
        self.replace(toml::from_str(text)?);
        info!("reloaded interceptor configuration");
        Ok(())
    }

    /// Replaces the configuration with the contents of a TOML file. On error the current
    /// configuration is kept.
    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        self.replace(read_config(path)?);
        info!(path = %path.display(), "reloaded interceptor configuration");
        Ok(())
    }

    /// Swaps in a new configuration.
    pub fn replace(&self, config: InterceptorConfig) {
        *self.current.write() = config;
    }

    /// A copy of the current configuration.
    pub fn snapshot(&self) -> InterceptorConfig {
        self.current.read().clone()
    }

    /// An accessor which reads one field of the configuration at each call.
    pub fn value<T>(self: &Arc<Self>, read: fn(&InterceptorConfig) -> T) -> ConfigValue<T> {
        ConfigValue {
            store: Arc::clone(self),
            read,
        }
    }
}

fn read_config(path: &Path) -> Result<InterceptorConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(toml::from_str(&text)?)
}

/// A [`DynamicValue`] backed by a [`ConfigStore`].
pub struct ConfigValue<T> {
    store: Arc<ConfigStore>,
    read: fn(&InterceptorConfig) -> T,
}

impl<T> DynamicValue<T> for ConfigValue<T> {
    fn get(&self) -> T {
        (self.read)(&self.store.current.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_use_defaults() {
        let store = ConfigStore::from_toml_str("").unwrap();
        assert_eq!(store.snapshot(), InterceptorConfig::default());
        assert!(store.snapshot().commands.enable_cache);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let store = ConfigStore::from_toml_str(
            r#"
            [messages]
            parameter_error = "&cNope: %s"

            [commands]
            enable_cache = false
            "#,
        )
        .unwrap();
        let config = store.snapshot();
        assert_eq!(config.messages.parameter_error, "&cNope: %s");
        assert_eq!(config.messages.command_error, DEFAULT_COMMAND_ERROR);
        assert!(!config.commands.enable_cache);
    }

    #[test]
    fn values_follow_reloads() {
        let store = ConfigStore::new(InterceptorConfig::default());
        let cache = store.value(|config| config.commands.enable_cache);
        assert!(cache.get());

        store
            .reload_from_str("[commands]\nenable_cache = false\n")
            .unwrap();
        assert!(!cache.get());
    }

    #[test]
    fn failed_reload_keeps_previous_config() {
        let store = ConfigStore::from_toml_str("[commands]\nenable_cache = false\n").unwrap();
        assert!(store.reload_from_str("[commands]\nenable_cache = 3\n").is_err());
        assert!(!store.snapshot().commands.enable_cache);
    }

    #[test]
    fn missing_file_reports_path() {
        let error = ConfigStore::load_from_path("/nonexistent/interceptor.toml").unwrap_err();
        assert!(error.to_string().contains("/nonexistent/interceptor.toml"));
    }

    #[test]
    fn closures_are_dynamic_values() {
        let template = || "&c%s".to_owned();
        assert_eq!(DynamicValue::<String>::get(&template), "&c%s");
    }
}
