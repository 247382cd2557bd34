//! Screen layout: turns a `MetadataModel` into device-agnostic draw
//! instructions for a small fixed-size monochrome canvas.
//!
//! Layout is pure. It never fails for a well-formed model and knows nothing
//! about the device beyond its size and per-size glyph widths.

mod icons;
mod time;

pub use icons::*;
pub use time::*;

use crate::metadata::{LoopStatus, MetadataModel};

pub const STOPPED_MESSAGE: &str = "Music Playback Stopped";
pub const DISCONNECTED_MESSAGE: &str = "Player Disconnected";

pub const TITLE_ROW: u32 = 0;
pub const ALBUM_ROW: u32 = 1;
pub const ARTIST_ROW: u32 = 2;
pub const TIME_ROW: u32 = 4;
/// Row used for single-line status screens (stopped, disconnected).
pub const MESSAGE_ROW: u32 = 2;

/// Distance of the loop icon's left edge from the right edge of the canvas.
pub const ICON_RIGHT_OFFSET: u32 = 8;

/// Canvas size in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
}

impl Default for Geometry {
    /// The 160x43 panel of G15-class keyboards.
    fn default() -> Self {
        Self {
            width: 160,
            height: 43,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    /// Fixed advance per character, in pixels.
    pub const fn glyph_width(self) -> u32 {
        match self {
            FontSize::Small => 4,
            FontSize::Medium => 5,
            FontSize::Large => 8,
        }
    }

    /// Height of one text row, in pixels.
    pub const fn line_height(self) -> u32 {
        match self {
            FontSize::Small => 6,
            FontSize::Medium => 7,
            FontSize::Large => 13,
        }
    }
}

/// Font metrics as reported by the display driver. All glyphs of one size
/// are treated as equal width.
pub trait FontMetrics {
    fn glyph_width(&self, size: FontSize) -> u32 {
        size.glyph_width()
    }
}

/// A single device-agnostic drawing directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawInstruction {
    Text {
        text: String,
        row: u32,
        size: FontSize,
        /// Horizontal offset in pixels from the left edge.
        x: i32,
    },
    Bitmap {
        x: i32,
        y: i32,
        icon: &'static Icon,
    },
}

/// Left offset that centers `text` on a canvas `width` pixels wide.
///
/// Uses integer division and clamps overflowing text to the left edge.
pub fn center_x(text: &str, width: u32, glyph_width: u32) -> i32 {
    let text_width = i64::from(glyph_width) * text.chars().count() as i64;
    let x = (i64::from(width) - text_width) / 2;
    x.clamp(0, i64::from(i32::MAX)) as i32
}

fn centered<M: FontMetrics + ?Sized>(
    text: &str,
    row: u32,
    size: FontSize,
    geometry: Geometry,
    metrics: &M,
) -> DrawInstruction {
    DrawInstruction::Text {
        text: text.to_string(),
        row,
        size,
        x: center_x(text, geometry.width, metrics.glyph_width(size)),
    }
}

/// Icon overlay for the current loop mode, anchored bottom-right.
pub fn loop_icon(loop_status: Option<LoopStatus>, geometry: Geometry) -> Option<DrawInstruction> {
    let icon = icon_for(loop_status?);
    Some(DrawInstruction::Bitmap {
        x: geometry.width.saturating_sub(ICON_RIGHT_OFFSET) as i32,
        y: geometry.height.saturating_sub(icon.height) as i32,
        icon,
    })
}

/// One centered line of text and nothing else.
pub fn layout_message<M: FontMetrics + ?Sized>(
    message: &str,
    geometry: Geometry,
    metrics: &M,
    size: FontSize,
) -> Vec<DrawInstruction> {
    vec![centered(message, MESSAGE_ROW, size, geometry, metrics)]
}

/// Lay out one snapshot.
pub fn layout<M: FontMetrics + ?Sized>(
    model: &MetadataModel,
    geometry: Geometry,
    metrics: &M,
    size: FontSize,
) -> Vec<DrawInstruction> {
    if model.is_stopped() {
        return layout_message(STOPPED_MESSAGE, geometry, metrics, size);
    }

    let time = format_duration(remaining_time(model.length, model.position));

    let mut out = vec![
        centered(&model.title, TITLE_ROW, size, geometry, metrics),
        centered(&model.album, ALBUM_ROW, size, geometry, metrics),
        centered(model.display_artist(), ARTIST_ROW, size, geometry, metrics),
        centered(&time, TIME_ROW, size, geometry, metrics),
    ];
    out.extend(loop_icon(model.loop_status, geometry));
    out
}
