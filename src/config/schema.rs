use std::path::PathBuf;

use serde::Deserialize;

use crate::player::LoopMode;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/soundfree/config.toml` or
/// `~/.config/soundfree/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SOUNDFREE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub transport: TransportSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Loop mode at startup.
    pub loop_mode: LoopModeSetting,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            loop_mode: LoopModeSetting::NoLoop,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransportSettings {
    /// Worker poll interval in milliseconds: elapsed readback granularity
    /// and end-of-track detection latency.
    pub tick_ms: u64,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self { tick_ms: 200 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where the catalog snapshot lives; `None` means the XDG default.
    pub data_path: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopModeSetting {
    #[serde(alias = "none", alias = "no_loop")]
    NoLoop,
    #[serde(alias = "all", alias = "loop_all")]
    LoopAll,
    #[serde(alias = "one", alias = "loop_one", alias = "repeat-one")]
    LoopOne,
}

impl From<LoopModeSetting> for LoopMode {
    fn from(setting: LoopModeSetting) -> Self {
        match setting {
            LoopModeSetting::NoLoop => LoopMode::NoLoop,
            LoopModeSetting::LoopAll => LoopMode::LoopAll,
            LoopModeSetting::LoopOne => LoopMode::LoopOne,
        }
    }
}
