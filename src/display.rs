//! Display driver abstraction.
//!
//! The render loop only talks to [`DisplayDriver`]. The concrete driver,
//! [`CanvasDisplay`], rasterizes into an in-memory [`Canvas`] and hands the
//! finished frame to a [`FrameSink`] on `transmit`.

mod canvas;
mod sink;

pub use canvas::*;
pub use sink::*;

use std::path::PathBuf;

use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_4X6, FONT_5X7, FONT_8X13};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use thiserror::Error;

use crate::layout::{DrawInstruction, FontMetrics, FontSize, Geometry, Icon};

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("cannot open display device {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no display device configured")]
    NoDevice,
    #[error("display write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The primitive set every display driver provides.
pub trait DisplayDriver: FontMetrics {
    fn geometry(&self) -> Geometry;

    /// Blank the whole canvas.
    fn clear(&mut self);

    /// Draw `text` on text row `row` of the given size. Offsets are in
    /// pixels; `y_offset` is added to the row's top edge.
    fn render_text(&mut self, text: &str, row: u32, size: FontSize, x_offset: i32, y_offset: i32);

    fn overlay_bitmap(&mut self, x: i32, y: i32, icon: &Icon);

    /// Push the canvas to the device.
    fn transmit(&mut self) -> Result<(), DisplayError>;

    fn draw(&mut self, instruction: &DrawInstruction) {
        match instruction {
            DrawInstruction::Text { text, row, size, x } => {
                self.render_text(text, *row, *size, *x, 0)
            }
            DrawInstruction::Bitmap { x, y, icon } => self.overlay_bitmap(*x, *y, icon),
        }
    }
}

fn font_for(size: FontSize) -> &'static MonoFont<'static> {
    match size {
        FontSize::Small => &FONT_4X6,
        FontSize::Medium => &FONT_5X7,
        FontSize::Large => &FONT_8X13,
    }
}

/// Frame-buffer driver: draws with embedded-graphics into a [`Canvas`].
pub struct CanvasDisplay {
    canvas: Canvas,
    sink: Box<dyn FrameSink>,
}

impl CanvasDisplay {
    pub fn new(geometry: Geometry, sink: Box<dyn FrameSink>) -> Self {
        Self {
            canvas: Canvas::new(geometry.width, geometry.height),
            sink,
        }
    }

    #[cfg(test)]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

impl FontMetrics for CanvasDisplay {
    fn glyph_width(&self, size: FontSize) -> u32 {
        let font = font_for(size);
        font.character_size.width + font.character_spacing
    }
}

impl DisplayDriver for CanvasDisplay {
    fn geometry(&self) -> Geometry {
        Geometry {
            width: self.canvas.width(),
            height: self.canvas.height(),
        }
    }

    fn clear(&mut self) {
        self.canvas.fill(false);
    }

    fn render_text(&mut self, text: &str, row: u32, size: FontSize, x_offset: i32, y_offset: i32) {
        let font = font_for(size);
        let top = (row * size.line_height()) as i32 + y_offset;
        let style = MonoTextStyle::new(font, BinaryColor::On);
        // Drawing into the canvas cannot fail; pixels off the edge are clipped.
        let _ = Text::with_baseline(text, Point::new(x_offset, top), style, Baseline::Top)
            .draw(&mut self.canvas);
    }

    fn overlay_bitmap(&mut self, x: i32, y: i32, icon: &Icon) {
        let raw: ImageRaw<BinaryColor> = ImageRaw::new(icon.data, icon.width);
        let _ = Image::new(&raw, Point::new(x, y)).draw(&mut self.canvas);
    }

    fn transmit(&mut self) -> Result<(), DisplayError> {
        self.sink.send(&self.canvas)
    }
}

#[cfg(test)]
pub(crate) mod recording;

#[cfg(test)]
mod tests;
