//! Frame destinations for [`CanvasDisplay`](super::CanvasDisplay).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use log::debug;

use super::{Canvas, DisplayError};

/// Receives each finished frame.
pub trait FrameSink {
    fn send(&mut self, canvas: &Canvas) -> Result<(), DisplayError>;
}

/// Writes the packed frame buffer to a device node, FIFO or file.
pub struct DeviceSink<W: Write> {
    writer: W,
}

impl DeviceSink<File> {
    pub fn open(path: &Path) -> Result<Self, DisplayError> {
        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|source| DisplayError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("opened display device {}", path.display());
        Ok(Self::new(file))
    }
}

impl<W: Write> DeviceSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> FrameSink for DeviceSink<W> {
    fn send(&mut self, canvas: &Canvas) -> Result<(), DisplayError> {
        self.writer.write_all(canvas.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Prints each frame as `#`/`.` art, for running without hardware.
pub struct AsciiSink<W: Write> {
    writer: W,
}

impl<W: Write> AsciiSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for AsciiSink<W> {
    fn send(&mut self, canvas: &Canvas) -> Result<(), DisplayError> {
        let mut frame = String::with_capacity(((canvas.width() + 1) * (canvas.height() + 1)) as usize);
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                frame.push(if canvas.pixel(x, y) { '#' } else { '.' });
            }
            frame.push('\n');
        }
        frame.push('\n');
        self.writer.write_all(frame.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}
