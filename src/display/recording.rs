//! Display double that records every primitive call.

use super::{DisplayDriver, DisplayError};
use crate::layout::{FontMetrics, FontSize, Geometry, Icon};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Clear,
    Text {
        text: String,
        row: u32,
        size: FontSize,
        x: i32,
        y: i32,
    },
    Bitmap {
        x: i32,
        y: i32,
        icon: &'static str,
    },
    Transmit,
}

pub struct RecordingDisplay {
    pub geometry: Geometry,
    pub calls: Vec<Call>,
    /// Fail every transmit after this many successful ones.
    pub fail_transmit_after: Option<usize>,
    transmits: usize,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            geometry: Geometry::default(),
            calls: Vec::new(),
            fail_transmit_after: None,
            transmits: 0,
        }
    }

    /// Calls made since the last `Clear`, including it.
    pub fn last_frame(&self) -> &[Call] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == Call::Clear)
            .unwrap_or(0);
        &self.calls[start..]
    }

    pub fn texts(&self) -> Vec<(String, u32)> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                Call::Text { text, row, .. } => Some((text.clone(), *row)),
                _ => None,
            })
            .collect()
    }
}

fn icon_name(icon: &Icon) -> &'static str {
    use crate::layout::{ICON_LOOP_NONE, ICON_LOOP_PLAYLIST, ICON_LOOP_TRACK};
    if std::ptr::eq(icon, &ICON_LOOP_NONE) {
        "none"
    } else if std::ptr::eq(icon, &ICON_LOOP_TRACK) {
        "track"
    } else if std::ptr::eq(icon, &ICON_LOOP_PLAYLIST) {
        "playlist"
    } else {
        "other"
    }
}

impl FontMetrics for RecordingDisplay {}

impl DisplayDriver for RecordingDisplay {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn render_text(&mut self, text: &str, row: u32, size: FontSize, x_offset: i32, y_offset: i32) {
        self.calls.push(Call::Text {
            text: text.to_string(),
            row,
            size,
            x: x_offset,
            y: y_offset,
        });
    }

    fn overlay_bitmap(&mut self, x: i32, y: i32, icon: &Icon) {
        self.calls.push(Call::Bitmap {
            x,
            y,
            icon: icon_name(icon),
        });
    }

    fn transmit(&mut self) -> Result<(), DisplayError> {
        self.calls.push(Call::Transmit);
        self.transmits += 1;
        match self.fail_transmit_after {
            Some(limit) if self.transmits > limit => Err(DisplayError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "device unplugged",
            ))),
            _ => Ok(()),
        }
    }
}
