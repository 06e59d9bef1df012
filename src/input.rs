//! Debounced mode button.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::{BUTTON_POLL_MS, DEBOUNCE_MS};
use crate::devices::ModeButton;
use crate::state::SharedSignal;
use crate::time::{TimeDuration, TimeInstant, reached};
use crate::types::OperatingMode;

/// Result of one button poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// No falling edge.
    Idle,

    /// A falling edge toggled the mode.
    Toggled(OperatingMode),

    /// A falling edge arrived inside the debounce window and was ignored.
    Suppressed,
}

/// Polls the mode button and toggles the operating mode on each press.
///
/// This is the only asynchronous writer of the shared state.
pub struct ModeInputMonitor<I: TimeInstant, B: ModeButton> {
    button: B,
    previous_level: bool,
    debounce_until: Option<I>,
}

impl<I: TimeInstant, B: ModeButton> ModeInputMonitor<I, B> {
    /// Creates the monitor, assuming the button starts released.
    pub fn new(button: B) -> Self {
        Self {
            button,
            previous_level: true,
            debounce_until: None,
        }
    }

    /// Samples the button at `now` and returns the delay until the next poll.
    pub fn service<M: RawMutex>(&mut self, signal: &SharedSignal<M, I>, now: I) -> I::Duration {
        let event = self.poll(signal, now);

        let delay_ms = match event {
            InputEvent::Toggled(_) => DEBOUNCE_MS,
            InputEvent::Idle | InputEvent::Suppressed => BUTTON_POLL_MS,
        };
        I::Duration::from_millis(u64::from(delay_ms))
    }

    /// Samples the button once and applies a toggle on an accepted edge.
    pub fn poll<M: RawMutex>(&mut self, signal: &SharedSignal<M, I>, now: I) -> InputEvent {
        let level = self.button.read_button();
        let falling_edge = self.previous_level && !level;
        self.previous_level = level;

        if !falling_edge {
            return InputEvent::Idle;
        }

        if let Some(until) = self.debounce_until {
            if !reached(until, now) {
                crate::log_debug!("button edge inside debounce window, ignored");
                return InputEvent::Suppressed;
            }
        }

        let mode = signal.toggle_mode(now);
        self.debounce_until = now.checked_add(I::Duration::from_millis(u64::from(DEBOUNCE_MS)));

        crate::log_info!("mode changed: {}", mode);
        if mode == OperatingMode::Normal {
            crate::log_info!("restarting at GREEN");
        }

        InputEvent::Toggled(mode)
    }
}
