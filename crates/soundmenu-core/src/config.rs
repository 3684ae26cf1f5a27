use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub popup: PopupConfig,
    #[serde(default = "default_entries", rename = "entry")]
    pub entries: Vec<EntryConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            popup: PopupConfig::default(),
            entries: default_entries(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "EndpointConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "EndpointConfig::default_timeout")]
    pub timeout_ms: u64,
}

impl EndpointConfig {
    fn default_base_url() -> String {
        "http://127.0.0.1:30001/audio/play".into()
    }
    fn default_timeout() -> u64 {
        5000
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupConfig {
    #[serde(default = "PopupConfig::default_header")]
    pub header: String,
    #[serde(default = "PopupConfig::default_font_size")]
    pub font_size: u32,
    /// Placement fallback before the first real layout pass.
    #[serde(default = "PopupConfig::default_width")]
    pub default_width: i32,
    #[serde(default = "PopupConfig::default_height")]
    pub default_height: i32,
}

impl PopupConfig {
    fn default_header() -> String {
        "🎧 Audio Player".into()
    }
    fn default_font_size() -> u32 {
        14
    }
    fn default_width() -> i32 {
        280
    }
    fn default_height() -> i32 {
        400
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            header: Self::default_header(),
            font_size: 14,
            default_width: 280,
            default_height: 400,
        }
    }
}

/// One configured menu row: either a separator or a selectable item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryConfig {
    #[serde(default)]
    pub separator: bool,
    #[serde(default)]
    pub label: String,
    /// Clip identifier appended to the endpoint base URL.
    #[serde(default)]
    pub clip: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub stop: bool,
    #[serde(default)]
    pub edit: bool,
}

/// Built-in entries used when the config file defines none.
fn default_entries() -> Vec<EntryConfig> {
    let clip = |label: &str, clip: &str, icon: &str| EntryConfig {
        label: label.into(),
        clip: clip.into(),
        icon: icon.into(),
        ..EntryConfig::default()
    };
    vec![
        clip("Aldooooooooooo", "aldoooo-aldo-giovanni-e-giacomo.mp3", "🔔"),
        clip("Delicatissimo", "delicatissimo.mp3", "🚨"),
        clip("Manu blasta tutti", "manu_blasta_tutti.mp3", "🚪"),
        clip("Un applauso", "applausiiiiiii_mvvLWOta.mp3", "👏"),
        clip("Vergognati", "vergognati.mp3", "✅"),
        EntryConfig {
            separator: true,
            ..EntryConfig::default()
        },
        EntryConfig {
            label: "Stop".into(),
            icon: "⏹".into(),
            stop: true,
            ..EntryConfig::default()
        },
        EntryConfig {
            label: "Edit menu".into(),
            icon: "✏️".into(),
            edit: true,
            ..EntryConfig::default()
        },
    ]
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/etc"))
            .join("soundmenu")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "parsing config TOML")
    }

    /// Path to the config file, writing a starter file with the built-in
    /// entries first if none exists yet, so the edit action always has a
    /// real file to open.
    pub fn ensure_config_file() -> Result<PathBuf> {
        let path = Self::config_path();
        if !path.exists() {
            std::fs::create_dir_all(Self::config_dir())
                .with_context(|| format!("creating {}", Self::config_dir().display()))?;
            let contents =
                toml::to_string_pretty(&Config::default()).context("serializing default config")?;
            std::fs::write(&path, contents)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- defaults ---

    #[test]
    fn default_base_url_points_at_play_route() {
        let config = Config::default();
        assert!(config.endpoint.base_url.ends_with("/audio/play"));
    }

    #[test]
    fn default_timeout_is_5000ms() {
        let config = Config::default();
        assert_eq!(config.endpoint.timeout_ms, 5000);
    }

    #[test]
    fn default_popup_fallback_size_is_280_by_400() {
        let config = Config::default();
        assert_eq!(config.popup.default_width, 280);
        assert_eq!(config.popup.default_height, 400);
    }

    #[test]
    fn default_entries_end_with_stop_and_edit() {
        let config = Config::default();
        let n = config.entries.len();
        assert!(config.entries[n - 2].stop);
        assert!(config.entries[n - 1].edit);
    }

    // --- TOML parsing ---

    #[test]
    fn parse_empty_toml_applies_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.endpoint.timeout_ms, 5000);
        assert!(!config.entries.is_empty());
    }

    #[test]
    fn parse_custom_endpoint() {
        let toml = r#"
[endpoint]
base_url = "http://192.168.1.70:30001/audio/play"
timeout_ms = 2500
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.endpoint.base_url, "http://192.168.1.70:30001/audio/play");
        assert_eq!(config.endpoint.timeout_ms, 2500);
    }

    #[test]
    fn parse_entry_list_preserves_order() {
        let toml = r#"
[[entry]]
label = "First"
clip = "first.mp3"
icon = "🔔"

[[entry]]
separator = true

[[entry]]
label = "Stop"
icon = "⏹"
stop = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.entries.len(), 3);
        assert_eq!(config.entries[0].clip, "first.mp3");
        assert!(config.entries[1].separator);
        assert!(config.entries[2].stop);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let serialized = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.entries.len(), Config::default().entries.len());
    }
}
