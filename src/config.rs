use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Project defaults, compiled in so the binary works without any file on disk.
pub const BLUEPRINT: &str = include_str!("../katfemtech.toml");

const LOCAL_CONFIG: &str = "katfemtech.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub site: SiteSettings,
    pub widget: WidgetSettings,
    pub timing: TimingSettings,
    pub layout: LayoutSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteSettings {
    pub title: String,
    pub description: String,
    pub lang: String,
    pub font_family: String,
}

/// The embeddable chat widget mounted by the exported page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WidgetSettings {
    pub enabled: bool,
    pub script_src: String,
    pub chatbot_id: String,
    pub domain: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingSettings {
    pub cursor_blink_ms: u64,
    pub select_scroll_delay_ms: u64,
    pub clear_scroll_delay_ms: u64,
    pub frame_ms: u64,
}

impl TimingSettings {
    pub fn cursor_blink(&self) -> Duration {
        Duration::from_millis(self.cursor_blink_ms)
    }

    pub fn select_scroll_delay(&self) -> Duration {
        Duration::from_millis(self.select_scroll_delay_ms)
    }

    pub fn clear_scroll_delay(&self) -> Duration {
        Duration::from_millis(self.clear_scroll_delay_ms)
    }

    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutSettings {
    pub scroll_offset_rows: usize,
    pub max_width: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    pub level: String,
    pub file: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

impl Settings {
    /// Layers, later ones win: compiled-in defaults, the user's global config,
    /// `katfemtech.toml` in the working directory, then `explicit` if given.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(get_user_config_path().as_deref(), Path::new(LOCAL_CONFIG), explicit)
    }

    fn load_from(user: Option<&Path>, local: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(File::from_str(BLUEPRINT, FileFormat::Toml));
        if let Some(user_config_path) = user {
            builder = builder.add_source(File::from(user_config_path.to_path_buf()).required(false));
        }
        builder = builder.add_source(File::from(local.to_path_buf()).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.cursor_blink_ms == 0 {
            return Err(ConfigError::Message("timing.cursor_blink_ms must be greater than 0".into()));
        }
        if self.timing.frame_ms == 0 {
            return Err(ConfigError::Message("timing.frame_ms must be greater than 0".into()));
        }
        if self.layout.max_width == 0 {
            return Err(ConfigError::Message("layout.max_width must be greater than 0".into()));
        }
        Ok(())
    }
}

pub fn get_user_config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".config");
    path.push("katfemtech");
    path.push("katfemtech.toml");
    Some(path)
}

/// Writes the blueprint to `path` unless a file is already there.
/// Returns whether a file was written.
pub fn init_user_config(path: &Path) -> Result<bool, anyhow::Error> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, BLUEPRINT)?;
    Ok(true)
}

/// Effective settings rendered back to TOML.
pub fn to_toml(settings: &Settings) -> Result<String, anyhow::Error> {
    Ok(toml::to_string_pretty(settings)?)
}
