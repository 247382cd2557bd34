use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::{OutputKind, Settings};

/// Environment variable naming a config file to read.
pub const CONFIG_PATH_ENV: &str = "MPRIS_LCD_CONFIG_PATH";

/// Largest canvas accepted, in pixels per side.
pub const MAX_DISPLAY_SIDE: u32 = 1024;

/// Configuration loading helpers.
impl Settings {
    /// Load settings from the environment and, when one is named, a config
    /// file. `explicit` (from the command line) wins over
    /// `MPRIS_LCD_CONFIG_PATH`.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path(explicit);

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(true));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MPRIS_LCD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err("display.width and display.height must be >= 1".to_string());
        }
        if self.display.width > MAX_DISPLAY_SIDE || self.display.height > MAX_DISPLAY_SIDE {
            return Err(format!(
                "display.width and display.height must be <= {MAX_DISPLAY_SIDE}"
            ));
        }
        if self.display.output == OutputKind::Device && self.display.device.is_none() {
            return Err("display.device is required when display.output = \"device\"".to_string());
        }
        if self.render_loop.poll_interval_ms == 0 {
            return Err("loop.poll_interval_ms must be >= 1".to_string());
        }
        if self.render_loop.retry_initial_ms == 0 {
            return Err("loop.retry_initial_ms must be >= 1".to_string());
        }
        if self.render_loop.retry_initial_ms > self.render_loop.retry_max_ms {
            return Err("loop.retry_initial_ms must not exceed loop.retry_max_ms".to_string());
        }
        Ok(())
    }
}

/// The config file to read, if any: `explicit`, else `MPRIS_LCD_CONFIG_PATH`.
/// There is no default location.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)
}
