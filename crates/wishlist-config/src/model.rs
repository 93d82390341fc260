use serde::{de::Deserializer, Deserialize, Serialize};
use std::{fmt, path::PathBuf};

use wishlist_domain::{Priority, DEFAULT_CATEGORY, DEFAULT_CURRENCY};

use crate::ConfigError;

/// Environment variable that overrides the data directory.
pub const DATA_ROOT_ENV: &str = "WISHLIST_HOME";

/// Stores user-configurable preferences and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_category_value")]
    pub default_category: String,
    #[serde(default)]
    pub default_priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened_wishlist: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for wishlists. Defaults to `~/Documents/Wishlist`.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: DEFAULT_CURRENCY.into(),
            theme: Theme::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            default_category: Self::default_category_value(),
            default_priority: Priority::default(),
            last_opened_wishlist: None,
            data_root: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 7] = [
        "locale",
        "currency",
        "theme",
        "ui_color_enabled",
        "default_category",
        "default_priority",
        "data_root",
    ];

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_category_value() -> String {
        DEFAULT_CATEGORY.into()
    }

    /// Resolves the data directory: explicit setting, then `~/Documents/Wishlist`.
    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Wishlist")
    }

    /// Renders a single setting for display.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "theme" => self.theme.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "default_category" => self.default_category.clone(),
            "default_priority" => self.default_priority.to_string(),
            "data_root" => self.resolve_data_root().display().to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Updates a single setting from user text.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let trimmed = value.trim();
        match key {
            "locale" => self.locale = non_empty(key, trimmed)?,
            "currency" => self.currency = non_empty(key, trimmed)?,
            "theme" => self.theme = Theme::from_str(trimmed),
            "ui_color_enabled" => {
                self.ui_color_enabled = parse_bool(trimmed).ok_or_else(|| {
                    ConfigError::InvalidValue {
                        key: key.into(),
                        message: "expected on/off".into(),
                    }
                })?
            }
            "default_category" => self.default_category = non_empty(key, trimmed)?,
            "default_priority" => {
                self.default_priority =
                    trimmed
                        .parse()
                        .map_err(|err: wishlist_domain::ParsePriorityError| {
                            ConfigError::InvalidValue {
                                key: key.into(),
                                message: err.to_string(),
                            }
                        })?
            }
            "data_root" => {
                self.data_root = if trimmed.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                }
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        Err(ConfigError::InvalidValue {
            key: key.into(),
            message: "value cannot be empty".into(),
        })
    } else {
        Ok(value.to_string())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Plain,
    #[default]
    Colorful,
}

impl Theme {
    fn from_value(value: Option<String>) -> Self {
        value
            .map(|v| Theme::from_str(v.trim()))
            .unwrap_or_default()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" => Theme::Plain,
            _ => Theme::Colorful,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Plain => "plain",
            Theme::Colorful => "colorful",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Theme::from_value(value))
    }
}
