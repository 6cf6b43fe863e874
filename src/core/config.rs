//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.blogdeck/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::source::ContentSource;
use crate::core::store::FileStore;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BlogdeckConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub blogs: Vec<BlogEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_blog: Option<String>,
    pub items_per_page: Option<usize>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub state_dir: Option<String>,
    pub persist_state: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlogEntry {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
}

impl From<&BlogEntry> for ContentSource {
    fn from(entry: &BlogEntry) -> Self {
        ContentSource {
            id: entry.id.clone(),
            name: entry.name.clone(),
            url: entry.url.clone(),
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
pub const MIN_ITEMS_PER_PAGE: usize = 5;
pub const MAX_ITEMS_PER_PAGE: usize = 50;
pub const DEFAULT_LOG_FILE: &str = "blogdeck.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

fn default_blog() -> ContentSource {
    ContentSource::new("local", "My Blog")
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Never empty.
    pub blogs: Vec<ContentSource>,
    pub default_blog: Option<String>,
    pub items_per_page: usize,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub state_dir: PathBuf,
    pub persist_state: bool,
}

/// Values given on the command line. `None` / `false` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub blog: Option<String>,
    pub state_dir: Option<PathBuf>,
    pub no_persist: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.blogdeck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".blogdeck").join("config.toml"))
}

/// Load config from `~/.blogdeck/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `BlogdeckConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<BlogdeckConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(BlogdeckConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<BlogdeckConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(BlogdeckConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: BlogdeckConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Blogdeck Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_blog = "main"              # id of a [[blogs]] entry
# items_per_page = 20                # 5..=50
# log_level = "debug"                # "error", "warn", "info", "debug", "trace", "off"
# log_file = "blogdeck.log"

# [storage]
# state_dir = "/home/me/.blogdeck/state"   # Or set BLOGDECK_STATE_DIR env var
# persist_state = true               # false keeps tab state in memory only

# [[blogs]]
# id = "main"
# name = "Main Blog"
# url = "https://example.wordpress.com"

# [[blogs]]
# id = "travel"
# name = "Travel Notes"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &BlogdeckConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &BlogdeckConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let mut blogs: Vec<ContentSource> = config.blogs.iter().map(ContentSource::from).collect();
    if blogs.is_empty() {
        blogs.push(default_blog());
    }

    // Blog: CLI → env → config
    let default_blog = cli
        .blog
        .clone()
        .or_else(|| env("BLOGDECK_BLOG"))
        .or_else(|| config.general.default_blog.clone());

    // State dir: CLI → env → config → ~/.blogdeck/state → ./.blogdeck-state
    let state_dir = cli
        .state_dir
        .clone()
        .or_else(|| env("BLOGDECK_STATE_DIR").map(PathBuf::from))
        .or_else(|| config.storage.state_dir.as_ref().map(PathBuf::from))
        .or_else(FileStore::default_dir)
        .unwrap_or_else(|| PathBuf::from(".blogdeck-state"));

    // Log level: env → config → default
    let log_level = env("BLOGDECK_LOG_LEVEL")
        .or_else(|| config.general.log_level.clone())
        .and_then(|level| match LevelFilter::from_str(&level) {
            Ok(filter) => Some(filter),
            Err(_) => {
                warn!("Unknown log level '{}', using {}", level, DEFAULT_LOG_LEVEL);
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let items_per_page = config
        .general
        .items_per_page
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
        .clamp(MIN_ITEMS_PER_PAGE, MAX_ITEMS_PER_PAGE);

    ResolvedConfig {
        blogs,
        default_blog,
        items_per_page,
        log_level,
        log_file: config
            .general
            .log_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        state_dir,
        persist_state: !cli.no_persist && config.storage.persist_state.unwrap_or(true),
    }
}
