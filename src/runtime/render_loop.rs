use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::{ErrorPolicy, LoopSettings};
use crate::display::{DisplayDriver, DisplayError};
use crate::layout::{DISCONNECTED_MESSAGE, DrawInstruction, FontSize, layout, layout_message};
use crate::mpris::{FetchError, PlayerProperties, fetch};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot read player state: {0}")]
    Fetch(#[from] FetchError),
    #[error("cannot update display: {0}")]
    Display(#[from] DisplayError),
}

/// Exponential retry delay, doubled per consecutive failure up to `max`.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            current: initial,
        }
    }

    /// Delay to wait now; the following call returns twice as much.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current.min(self.max);
        self.current = self.current.saturating_mul(2).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

/// Poll, lay out, draw, sleep, repeat.
///
/// Owns the player handle and the display (and with it the canvas) for the
/// lifetime of the process. One cycle fully completes before the next starts.
pub struct RenderLoop<P, D> {
    player: P,
    display: D,
    font_size: FontSize,
    settings: LoopSettings,
    max_frames: Option<u64>,
}

impl<P: PlayerProperties, D: DisplayDriver> RenderLoop<P, D> {
    pub fn new(player: P, display: D, font_size: FontSize, settings: LoopSettings) -> Self {
        Self {
            player,
            display,
            font_size,
            settings,
            max_frames: None,
        }
    }

    /// Stop after `frames` cycles; `None` runs until an error or termination.
    pub fn with_max_frames(mut self, frames: Option<u64>) -> Self {
        self.max_frames = frames;
        self
    }

    #[cfg(test)]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// One fetch, layout, draw and transmit.
    pub fn tick(&mut self) -> Result<(), RunError> {
        let model = fetch(&self.player)?;
        let instructions = layout(&model, self.display.geometry(), &self.display, self.font_size);
        self.present(&instructions)?;
        Ok(())
    }

    /// Clear, redraw everything, then transmit.
    fn present(&mut self, instructions: &[DrawInstruction]) -> Result<(), DisplayError> {
        self.display.clear();
        for instruction in instructions {
            self.display.draw(instruction);
        }
        self.display.transmit()
    }

    fn show_disconnected(&mut self) -> Result<(), DisplayError> {
        let instructions = layout_message(
            DISCONNECTED_MESSAGE,
            self.display.geometry(),
            &self.display,
            self.font_size,
        );
        self.present(&instructions)
    }

    pub fn run(&mut self) -> Result<(), RunError> {
        self.run_with(thread::sleep)
    }

    /// [`run`](Self::run) with an injectable sleep.
    pub fn run_with(&mut self, mut sleep: impl FnMut(Duration)) -> Result<(), RunError> {
        let interval = Duration::from_millis(self.settings.poll_interval_ms);
        let mut backoff = Backoff::new(
            Duration::from_millis(self.settings.retry_initial_ms),
            Duration::from_millis(self.settings.retry_max_ms),
        );
        let mut frames = 0u64;

        info!(
            "polling every {}ms, on error: {:?}",
            self.settings.poll_interval_ms, self.settings.on_error
        );

        loop {
            let result = self.tick();
            frames += 1;
            let last = self.max_frames.is_some_and(|max| frames >= max);

            let delay = match result {
                Ok(()) => {
                    backoff.reset();
                    if last {
                        return Ok(());
                    }
                    interval
                }
                Err(e) => match self.settings.on_error {
                    ErrorPolicy::Exit => return Err(e),
                    ErrorPolicy::Retry => {
                        if last {
                            return Err(e);
                        }
                        let delay = backoff.next_delay();
                        warn!("{e}; retrying in {}ms", delay.as_millis());
                        if let Err(de) = self.show_disconnected() {
                            debug!("disconnected screen not shown: {de}");
                        }
                        delay
                    }
                },
            };

            sleep(delay);
        }
    }
}
