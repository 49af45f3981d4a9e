use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
#[cfg(not(any(target_os = "android", target_os = "ios")))]
use directories::ProjectDirs;
use serde::Deserialize;

use crate::bitmap::PngCompression;

pub const DEFAULT_CHANNEL: &str = "wallpaper_channel";
pub const CONFIG_FILE_NAME: &str = "bridge.toml";

/// Contents of `bridge.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Method channel name the UI side opens.
    #[serde(default = "default_channel")]
    pub channel: String,

    #[serde(default)]
    pub png_compression: PngCompression,

    /// Refuse platform-gated operations at runtime on too-old hosts.
    #[serde(default = "default_enforce_min_sdk")]
    pub enforce_min_sdk: bool,
}

fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}

fn default_enforce_min_sdk() -> bool {
    true
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            png_compression: PngCompression::default(),
            enforce_min_sdk: default_enforce_min_sdk(),
        }
    }
}

pub struct Conf {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub bridge: BridgeConfig,
}

impl Conf {
    /// Resolve the platform config directory and load `bridge.toml` from it,
    /// falling back to defaults when the file does not exist.
    pub fn new() -> Result<Self> {
        let config_dir = {
            #[cfg(target_os = "android")]
            {
                PathBuf::from("/data/data/com.test.custom_launcher/files")
            }

            #[cfg(target_os = "ios")]
            {
                PathBuf::from("/tmp/custom_launcher")
            }

            #[cfg(not(any(target_os = "android", target_os = "ios")))]
            {
                let proj_dirs = ProjectDirs::from("com", "test", "custom_launcher")
                    .context("Failed to get project directories")?;
                proj_dirs.config_dir().to_path_buf()
            }
        };

        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config dir {:?}", config_dir))?;

        Self::load_or_default(config_dir.join(CONFIG_FILE_NAME))
    }

    /// Load from an explicit file path; a missing file yields defaults.
    pub fn load_or_default(config_file: PathBuf) -> Result<Self> {
        let config_dir = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let bridge = if config_file.exists() {
            log::info!("Loading bridge config from {:?}", config_file);
            let content = fs::read_to_string(&config_file)
                .with_context(|| format!("Failed to read {:?}", config_file))?;
            Self::parse(&content)
                .with_context(|| format!("Invalid config file {:?}", config_file))?
        } else {
            log::info!("No config at {:?}, using defaults", config_file);
            BridgeConfig::default()
        };

        Ok(Conf {
            config_dir,
            config_file,
            bridge,
        })
    }

    pub fn parse(toml: &str) -> Result<BridgeConfig> {
        let file: FileConfig = toml::from_str(toml).context("Failed to parse bridge config")?;
        Ok(file.bridge)
    }
}
