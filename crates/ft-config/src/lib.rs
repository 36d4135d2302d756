//! Configuration management for filter-tabs builds.
//!
//! Parses `filter-tabs.toml` with serde and auto-discovers it in the current
//! directory or its parents. CLI settings are applied during load via
//! [`CliSettings`].
//!
//! ```toml
//! [tabs]
//! highlight_color = "#ff6600"
//! debug = false
//! collapsible_admonitions = true
//!
//! [build]
//! source_dir = "docs"
//! output_dir = "_build"
//! format = "html"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` and `${VAR:-default}` are expanded in `tabs.highlight_color`,
//! `build.source_dir` and `build.output_dir`.

mod expand;

use std::path::{Path, PathBuf};

use ft_tabs::{DEFAULT_HIGHLIGHT_COLOR, TargetFormat, is_safe_color};
use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "filter-tabs.toml";

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override output format.
    pub format: Option<TargetFormat>,
    /// Override theme highlight color.
    pub highlight_color: Option<String>,
    /// Override debug logging of tab resolution.
    pub debug: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tab rendering options.
    pub tabs: TabsConfig,
    /// Build options as written in TOML.
    build: BuildConfigRaw,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Tab rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Accent color of the selected tab, any CSS color expression.
    pub highlight_color: String,
    /// Log each resolved group at info level.
    pub debug: bool,
    /// Render `collapsible` admonitions as `<details>` in HTML output.
    pub collapsible_admonitions: bool,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_owned(),
            debug: false,
            collapsible_admonitions: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BuildConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    format: Option<String>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Directory scanned for markdown sources.
    pub source_dir: PathBuf,
    /// Directory the rendered site is written to.
    pub output_dir: PathBuf,
    /// Output format.
    pub format: TargetFormat,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`tabs.highlight_color`").
        field: String,
        /// Error message (e.g., "${`BRAND_COLOR`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `filter-tabs.toml` in the current directory and its parents, and
    /// falls back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing
    /// fails, or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Create default config with paths relative to given base directory.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        Self {
            tabs: TabsConfig::default(),
            build: BuildConfigRaw::default(),
            build_resolved: BuildConfig {
                source_dir: base.join("docs"),
                output_dir: base.join("_build"),
                format: TargetFormat::default(),
            },
            config_path: None,
        }
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.build_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(format) = settings.format {
            self.build_resolved.format = format;
        }
        if let Some(color) = &settings.highlight_color {
            self.tabs.highlight_color.clone_from(color);
        }
        if let Some(debug) = settings.debug {
            self.tabs.debug = debug;
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the highlight color is empty or
    /// could break out of its CSS declaration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let color = &self.tabs.highlight_color;
        require_non_empty(color, "tabs.highlight_color")?;
        if !is_safe_color(color) {
            return Err(ConfigError::Validation(format!(
                "tabs.highlight_color '{color}' is not a valid CSS color"
            )));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.tabs.highlight_color =
            expand::expand_env(&self.tabs.highlight_color, "tabs.highlight_color")?;

        if let Some(ref dir) = self.build.source_dir {
            self.build.source_dir = Some(expand::expand_env(dir, "build.source_dir")?);
        }
        if let Some(ref dir) = self.build.output_dir {
            self.build.output_dir = Some(expand::expand_env(dir, "build.output_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and parse the format.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let format = match self.build.format.as_deref() {
            Some(format) => format.parse::<TargetFormat>().map_err(|e| {
                ConfigError::Validation(format!("build.format: {e}"))
            })?,
            None => TargetFormat::default(),
        };

        self.build_resolved = BuildConfig {
            source_dir: resolve(self.build.source_dir.as_deref(), "docs"),
            output_dir: resolve(self.build.output_dir.as_deref(), "_build"),
            format,
        };

        Ok(())
    }
}
