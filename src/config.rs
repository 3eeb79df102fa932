use crate::command::{npm_registry, CommandRunner};
use crate::domain::TagPattern;
use crate::error::{Result, XutlError};
use crate::manifest::MANIFEST_FILE;
use crate::registry::DEFAULT_REGISTRY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "xutlversion.toml";

/// Represents the complete configuration for xutlversion.
///
/// Every key is optional; a missing file is the same as an empty one.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Registry base URL, overriding the package manager's setting
    #[serde(default)]
    pub registry: Option<String>,

    /// Pattern naming release tags, must contain `{version}`
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    /// Manifest file name inside a package directory
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

fn default_tag_pattern() -> String {
    TagPattern::default().pattern
}

fn default_manifest() -> String {
    MANIFEST_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            registry: None,
            tag_pattern: default_tag_pattern(),
            manifest: default_manifest(),
        }
    }
}

impl Config {
    /// The validated tag pattern
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.tag_pattern.clone())
    }
}

/// Where the registry base URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrySource {
    CommandLine,
    ConfigFile,
    PackageManager,
    Default,
}

/// Pick the registry base URL.
///
/// Precedence: command line, configuration file, `npm config get registry`,
/// then [`DEFAULT_REGISTRY`]. A failing package manager is not an error; the
/// reason is returned alongside the default so the caller can warn about it.
pub fn resolve_registry(
    cli: Option<&str>,
    config: &Config,
    runner: &dyn CommandRunner,
) -> (String, RegistrySource, Option<XutlError>) {
    if let Some(registry) = cli {
        return (registry.to_string(), RegistrySource::CommandLine, None);
    }
    if let Some(registry) = &config.registry {
        return (registry.clone(), RegistrySource::ConfigFile, None);
    }
    match npm_registry(runner) {
        Ok(registry) => (registry, RegistrySource::PackageManager, None),
        Err(e) => (DEFAULT_REGISTRY.to_string(), RegistrySource::Default, Some(e)),
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `xutlversion.toml` in current directory
/// 3. `.xutlversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed, or the tag pattern is invalid
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE).exists() {
        fs::read_to_string(CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse and validate configuration text
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text).map_err(|e| XutlError::config(e.to_string()))?;
    config.tag_pattern()?;
    if config.manifest.trim().is_empty() {
        return Err(XutlError::config("manifest file name must not be empty"));
    }
    Ok(config)
}
