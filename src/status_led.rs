//! Warning blink on the discrete RGB status LED.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::STATUS_BLINK_MS;
use crate::devices::StatusLed;
use crate::profile::LedMask;
use crate::state::{SharedSignal, SignalState};
use crate::time::{TimeDuration, TimeInstant};
use crate::types::OperatingMode;

/// Blinks the status LED in the current color while the warning is active
/// and keeps it dark otherwise.
pub struct StatusLedBlinker<L: StatusLed> {
    led: L,
    phase_on: bool,
    shown: LedMask,
}

impl<L: StatusLed> StatusLedBlinker<L> {
    /// Creates the blinker with the LED off.
    pub fn new(mut led: L) -> Self {
        led.set(false, false, false);

        Self {
            led,
            phase_on: false,
            shown: LedMask::OFF,
        }
    }

    /// Advances the blink from the latest state and returns the blink delay.
    pub fn service<M: RawMutex, I: TimeInstant>(
        &mut self,
        signal: &SharedSignal<M, I>,
    ) -> I::Duration {
        self.render(&signal.snapshot());
        I::Duration::from_millis(u64::from(STATUS_BLINK_MS))
    }

    /// Advances the blink for `state`.
    ///
    /// Each call in a warning window flips the blink phase. Outside a warning,
    /// and always in night mode, the LED is switched off and the phase
    /// restarts so the next warning begins lit.
    pub fn render<I>(&mut self, state: &SignalState<I>) {
        let mask = match state.mode {
            OperatingMode::Normal if state.warning_active => {
                self.phase_on = !self.phase_on;
                state.color.profile().status_led.gated(self.phase_on)
            }
            _ => {
                self.phase_on = false;
                LedMask::OFF
            }
        };

        self.led.set(mask.red, mask.green, mask.blue);
        self.shown = mask;
    }

    /// Channels lit by the last update.
    pub fn current_mask(&self) -> LedMask {
        self.shown
    }
}
