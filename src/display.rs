//! Text display renderer.
//!
//! Layout targets a 128x64 monochrome panel with a 6x10 font. Frames are
//! composed as plain lines first and then pushed, so the composition can be
//! checked without any display attached.

use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::{String, Vec};

use crate::config::DISPLAY_REFRESH_MS;
use crate::devices::TextDisplay;
use crate::profile::NIGHT_PROFILE;
use crate::state::{SharedSignal, SignalState};
use crate::time::{TimeDuration, TimeInstant};
use crate::types::OperatingMode;

/// Longest line the display can hold at 6 px per glyph.
pub const LINE_CAPACITY: usize = 21;

/// Most lines any frame uses.
pub const MAX_LINES: usize = 3;

const TITLE: (&str, i32, i32) = ("SEMAFORO", 30, 10);
const STATUS_Y: i32 = 30;
const COUNTDOWN_POS: (i32, i32) = (20, 50);
const NIGHT_TITLE: (&str, i32, i32) = ("MODO NOTURNO", 20, 20);
const NIGHT_STATUS_Y: i32 = 40;

/// One positioned text line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String<LINE_CAPACITY>,
    pub x: i32,
    pub y: i32,
}

impl DisplayLine {
    /// Builds a line, truncating `text` to [`LINE_CAPACITY`].
    pub fn new(text: &str, x: i32, y: i32) -> Self {
        let mut line = String::new();
        for ch in text.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
        Self { text: line, x, y }
    }
}

/// A full frame of text lines, drawn in order.
pub type DisplayFrame = Vec<DisplayLine, MAX_LINES>;

/// Composes the frame for `state`.
///
/// NORMAL mode shows the title and the status word, plus the countdown while
/// the warning is active. NIGHT mode shows the night banner and the caution
/// word.
pub fn compose<I: TimeInstant>(state: &SignalState<I>) -> DisplayFrame {
    let mut frame = DisplayFrame::new();

    match state.mode {
        OperatingMode::Normal => {
            let profile = state.color.profile();
            push_line(&mut frame, DisplayLine::new(TITLE.0, TITLE.1, TITLE.2));
            push_line(
                &mut frame,
                DisplayLine::new(profile.status_text, profile.status_x, STATUS_Y),
            );

            if state.warning_active {
                let mut text = String::<LINE_CAPACITY>::new();
                // "Troca em 15s" fits well within the line.
                let _ = write!(text, "Troca em {}s", state.seconds_remaining());
                push_line(
                    &mut frame,
                    DisplayLine {
                        text,
                        x: COUNTDOWN_POS.0,
                        y: COUNTDOWN_POS.1,
                    },
                );
            }
        }
        OperatingMode::Night => {
            push_line(
                &mut frame,
                DisplayLine::new(NIGHT_TITLE.0, NIGHT_TITLE.1, NIGHT_TITLE.2),
            );
            push_line(
                &mut frame,
                DisplayLine::new(
                    NIGHT_PROFILE.status_text,
                    NIGHT_PROFILE.status_x,
                    NIGHT_STATUS_Y,
                ),
            );
        }
    }

    frame
}

fn push_line(frame: &mut DisplayFrame, line: DisplayLine) {
    if frame.push(line).is_err() {
        crate::log_warn!("display frame full, line dropped");
    }
}

/// Redraws the text display from the shared state.
pub struct DisplayRenderer<D: TextDisplay> {
    display: D,
    frame: DisplayFrame,
}

impl<D: TextDisplay> DisplayRenderer<D> {
    /// Creates the renderer and blanks the display.
    pub fn new(mut display: D) -> Self {
        display.clear();
        display.flush();

        Self {
            display,
            frame: DisplayFrame::new(),
        }
    }

    /// Redraws from the latest state and returns the refresh delay.
    pub fn service<M: RawMutex, I: TimeInstant>(
        &mut self,
        signal: &SharedSignal<M, I>,
    ) -> I::Duration {
        self.render(&signal.snapshot());
        I::Duration::from_millis(u64::from(DISPLAY_REFRESH_MS))
    }

    /// Clears the frame buffer, draws every line for `state`, and flushes.
    pub fn render<I: TimeInstant>(&mut self, state: &SignalState<I>) {
        self.frame = compose(state);

        self.display.clear();
        for line in &self.frame {
            self.display.draw_text(&line.text, line.x, line.y);
        }
        self.display.flush();
    }

    /// Lines of the last frame pushed.
    pub fn current_frame(&self) -> &[DisplayLine] {
        &self.frame
    }
}
