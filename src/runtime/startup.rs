use std::io;

use log::debug;

use crate::config;
use crate::display::{AsciiSink, CanvasDisplay, DeviceSink, DisplayError, FrameSink};
use crate::layout::{FontSize, Geometry};

pub fn font_size(setting: config::FontSizeSetting) -> FontSize {
    match setting {
        config::FontSizeSetting::Small => FontSize::Small,
        config::FontSizeSetting::Medium => FontSize::Medium,
        config::FontSizeSetting::Large => FontSize::Large,
    }
}

/// Build the canvas driver and its frame sink from display settings.
pub fn open_display(settings: &config::DisplaySettings) -> Result<CanvasDisplay, DisplayError> {
    let geometry = Geometry {
        width: settings.width,
        height: settings.height,
    };

    let sink: Box<dyn FrameSink> = match settings.output {
        config::OutputKind::Ascii => Box::new(AsciiSink::new(io::stdout())),
        config::OutputKind::Device => {
            let Some(path) = settings.device.as_deref() else {
                return Err(DisplayError::NoDevice);
            };
            Box::new(DeviceSink::open(path)?)
        }
    };

    debug!(
        "{}x{} canvas, output {:?}",
        geometry.width, geometry.height, settings.output
    );
    Ok(CanvasDisplay::new(geometry, sink))
}
