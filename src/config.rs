//! Configuration loading for ils.
//!
//! Handles loading the optional `ils.toml` file and resolving which icon theme to use.
//! A missing file means defaults; a broken one is reported as a warning and ignored.

use serde::Deserialize;

use std::fs;
use std::path::PathBuf;

/// Theme directory used when nothing else is configured.
pub const DEFAULT_THEME_PATH: &str = "theme";

/// Configuration as read from the toml file.
///
/// # Examples
/// ```toml
/// theme = "/usr/local/share/ils/theme"
/// ```
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    theme: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path.
    /// If the file does not exist or fails to parse, returns the default configuration.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Determine the configuration file path.
    /// Checks the ILS_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/ils/ils.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("ILS_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("ils/ils.toml");
        }

        if let Some(home) = dirs::home_dir() {
            return home.join(".config/ils/ils.toml");
        }
        PathBuf::from("ils.toml")
    }

    /// Theme directory to load.
    ///
    /// Precedence: the ILS_THEME environment variable, the config file, the
    /// ILS_THEME_PATH value baked in at build time, then [DEFAULT_THEME_PATH].
    pub fn theme_path(&self) -> PathBuf {
        self.resolve_theme(std::env::var_os("ILS_THEME").map(PathBuf::from))
    }

    fn resolve_theme(&self, env_override: Option<PathBuf>) -> PathBuf {
        env_override
            .or_else(|| self.theme.clone())
            .or_else(|| option_env!("ILS_THEME_PATH").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_THEME_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_theme_path() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::parse(r#"theme = "/opt/ils/theme""#)?;
        assert_eq!(config.resolve_theme(None), PathBuf::from("/opt/ils/theme"));
        Ok(())
    }

    #[test]
    fn empty_file_is_default() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(Config::parse("")?, Config::default());
        Ok(())
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(Config::parse("theme = 42").is_err());
    }

    #[test]
    fn environment_override_wins() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::parse(r#"theme = "/opt/ils/theme""#)?;
        assert_eq!(
            config.resolve_theme(Some(PathBuf::from("/tmp/other"))),
            PathBuf::from("/tmp/other")
        );
        Ok(())
    }

    #[test]
    fn falls_back_to_builtin_location() {
        let expected = option_env!("ILS_THEME_PATH").unwrap_or(DEFAULT_THEME_PATH);
        assert_eq!(
            Config::default().resolve_theme(None),
            PathBuf::from(expected)
        );
    }
}
