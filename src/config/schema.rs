use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings.
///
/// Precedence (highest wins):
/// 1) Command-line flags (applied by the runtime)
/// 2) Environment variables (prefix `MPRIS_LCD__`, `__` as nested separator)
/// 3) Config file, only when one is named explicitly
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub display: DisplaySettings,
    pub layout: LayoutSettings,
    #[serde(rename = "loop")]
    pub render_loop: LoopSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Which message bus the player lives on.
    pub bus: BusKind,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusKind {
    #[default]
    Session,
    System,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    pub output: OutputKind,
    /// Device node (or FIFO) that receives packed frames when
    /// `output = "device"`.
    pub device: Option<PathBuf>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 160,
            height: 43,
            output: OutputKind::Ascii,
            device: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputKind {
    /// Print frames to stdout.
    #[serde(alias = "stdout", alias = "preview")]
    Ascii,
    /// Write packed frames to `display.device`.
    Device,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub font_size: FontSizeSetting,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            font_size: FontSizeSetting::Medium,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSizeSetting {
    #[serde(alias = "sm")]
    Small,
    #[serde(alias = "med", alias = "normal")]
    Medium,
    #[serde(alias = "lg")]
    Large,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoopSettings {
    /// Delay between two polls (milliseconds).
    pub poll_interval_ms: u64,
    /// What to do when the player or the display fails.
    pub on_error: ErrorPolicy,
    /// First retry delay (milliseconds), doubled on each consecutive failure.
    pub retry_initial_ms: u64,
    /// Upper bound for the retry delay (milliseconds).
    pub retry_max_ms: u64,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            on_error: ErrorPolicy::Exit,
            retry_initial_ms: 500,
            retry_max_ms: 30_000,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop on the first failure.
    #[serde(alias = "fatal", alias = "quit")]
    Exit,
    /// Show a disconnected screen and retry with exponential backoff.
    #[serde(alias = "backoff")]
    Retry,
}
