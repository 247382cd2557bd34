//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ErrorPolicy, OutputKind, Settings};

/// Show what an MPRIS media player is playing on a small monochrome LCD.
#[derive(Debug, Parser)]
#[command(name = "mpris-lcd", version, about)]
pub struct Cli {
    /// Player to show, e.g. `spotify` or `org.mpris.MediaPlayer2.vlc`.
    pub player: String,

    /// Read settings from this TOML file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Render a single frame and exit.
    #[arg(long)]
    pub once: bool,

    /// Print frames to stdout instead of a device.
    #[arg(long, conflicts_with = "device")]
    pub ascii: bool,

    /// Write packed frames to this device node or FIFO.
    #[arg(long, value_name = "PATH")]
    pub device: Option<PathBuf>,

    /// Poll interval in milliseconds.
    #[arg(short, long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Keep running when the player or display fails, with backoff.
    #[arg(long)]
    pub retry: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Overlay command-line flags on loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if self.ascii {
            settings.display.output = OutputKind::Ascii;
        }
        if let Some(device) = &self.device {
            settings.display.output = OutputKind::Device;
            settings.display.device = Some(device.clone());
        }
        if let Some(ms) = self.interval {
            settings.render_loop.poll_interval_ms = ms;
        }
        if self.retry {
            settings.render_loop.on_error = ErrorPolicy::Retry;
        }
    }

    pub fn max_frames(&self) -> Option<u64> {
        self.once.then_some(1)
    }
}
