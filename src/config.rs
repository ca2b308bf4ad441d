//! Configuration file handling for glyphcast.
//!
//! Loads configuration from `~/.config/glyphcast/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ascii::{CharSet, ColorMode, GlyphPalette, MapperConfig, DEFAULT_WIDTH};

/// Configuration file structure for glyphcast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<CharSet>,
    /// Custom palette, overrides `charset`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chars: Option<String>,
    #[serde(default)]
    pub invert: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RevealConfig {
    #[serde(default)]
    pub animate: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Template written by `glyphcast config init`.
pub const DEFAULT_CONFIG: &str = r#"# glyphcast configuration

[render]
# Output width in characters
width = 100
# Character set: simple, detailed, contrast, blocks, braille
charset = "simple"
# Custom characters, darkest first (overrides charset)
# chars = " .:#"
# Reverse the character ramp (for light backgrounds)
invert = false
# Color mode: none, grayscale, truecolor
color = "none"

[reveal]
# Reveal the output row by row instead of all at once
animate = false

[provider]
# OpenAI-compatible API base URL
# base_url = "https://api.openai.com/v1"
# Generated image size
size = "512x512"
"#;

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Without one, the default
    /// path is tried and a missing file yields the default config.
    /// Returns an error if a file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = default_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Load and parse a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Mapper settings from this file, built-in defaults for anything unset.
    pub fn mapper_config(&self) -> MapperConfig {
        let palette = match &self.render.chars {
            Some(chars) => GlyphPalette::custom(chars),
            None => self.render.charset.unwrap_or_default().into(),
        };
        MapperConfig {
            target_width: self.render.width.unwrap_or(DEFAULT_WIDTH),
            palette,
            inverted: self.render.invert,
            color_mode: self.render.color.unwrap_or_default(),
        }
    }
}

/// Write the commented default config to `path`.
///
/// # Errors
/// `ConfigError::AlreadyExists` if the file is already there.
pub fn init(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let io_err = |e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(io_err)?;
    Ok(path.to_path_buf())
}

/// Errors that can occur when loading or writing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glyphcast").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/glyphcast/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.render.width, Some(100));
        assert_eq!(config.render.charset, Some(CharSet::Simple));
        assert_eq!(config.render.color, Some(ColorMode::None));
        assert!(!config.reveal.animate);
        assert_eq!(config.provider.size.as_deref(), Some("512x512"));
        assert_eq!(config.mapper_config(), MapperConfig::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_custom_chars_override_charset() {
        let config = Config::parse(
            r#"
            [render]
            charset = "blocks"
            chars = " #"
            invert = true
            color = "truecolor"
            "#,
        )
        .unwrap();
        let mapper = config.mapper_config();
        assert_eq!(mapper.palette, GlyphPalette::custom(" #"));
        assert!(mapper.inverted);
        assert_eq!(mapper.color_mode, ColorMode::Truecolor);
    }

    #[test]
    fn test_unknown_charset_is_parse_error() {
        assert!(Config::parse("[render]\ncharset = \"standard\"").is_err());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render\nwidth = ").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_init_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glyphcast").join("config.toml");
        init(&path).unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap().render.width, Some(100));
        assert!(matches!(init(&path), Err(ConfigError::AlreadyExists(_))));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let mut config = Config::default();
        config.render.width = Some(42);
        config.reveal.animate = true;
        let text = config.to_toml().unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = default_path();
        assert!(path.ends_with("glyphcast/config.toml"));
    }
}
