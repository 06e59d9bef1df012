//! Timed color and night-flash transitions.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::{NIGHT_FLASH_PERIOD_MS, NIGHT_TICK_MS, NORMAL_TICK_MS};
use crate::state::SharedSignal;
use crate::time::{TimeDuration, TimeInstant, millis_between};
use crate::types::{OperatingMode, SignalColor};

/// What a single state machine tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Still dwelling in the current color or flash phase.
    Holding,

    /// The dwell time ran out and the color advanced.
    Advanced(SignalColor),

    /// The night flash flipped to the given phase.
    Flashed(bool),

    /// A mode toggle was observed; the previous dwell was abandoned.
    ModeChanged(OperatingMode),
}

/// Owns the timed writes to the shared signal state.
///
/// Call [`service`](Self::service) after each returned delay. In the firmware
/// the delay is raced against
/// [`SharedSignal::wait_mode_change`], so a toggle cuts the wait short.
pub struct StateMachine<I: TimeInstant> {
    last_tick: Option<I>,
    epoch: u32,
    last_outcome: TickOutcome,
}

impl<I: TimeInstant> StateMachine<I> {
    pub fn new() -> Self {
        Self {
            last_tick: None,
            epoch: 0,
            last_outcome: TickOutcome::Holding,
        }
    }

    /// Runs one tick at `now` and returns the delay until the next one.
    ///
    /// NORMAL mode adds the time since the previous tick to the current
    /// color, advancing it once its duration is used up. NIGHT mode flips the
    /// flash phase every [`NIGHT_FLASH_PERIOD_MS`], and lights it on the
    /// first tick after entering the mode.
    pub fn service<M: RawMutex>(&mut self, signal: &SharedSignal<M, I>, now: I) -> I::Duration {
        let last_tick = self.last_tick.replace(now).unwrap_or(now);
        let known_epoch = self.epoch;

        let (outcome, epoch, mode) = signal.update(|state| {
            let toggled = state.mode_epoch != known_epoch;
            // After a toggle, time only counts from the toggle itself.
            let since = if toggled {
                state.night_phase_started_at
            } else {
                last_tick
            };

            let outcome = match state.mode {
                OperatingMode::Normal => {
                    match state.advance(millis_between(since, now)) {
                        Some(color) => TickOutcome::Advanced(color),
                        None if toggled => TickOutcome::ModeChanged(state.mode),
                        None => TickOutcome::Holding,
                    }
                }
                OperatingMode::Night => {
                    let entering = toggled && !state.night_led_on;
                    let since_flip = millis_between(state.night_phase_started_at, now);
                    if entering || since_flip >= NIGHT_FLASH_PERIOD_MS {
                        TickOutcome::Flashed(state.toggle_night_led(now))
                    } else if toggled {
                        TickOutcome::ModeChanged(state.mode)
                    } else {
                        TickOutcome::Holding
                    }
                }
            };

            (outcome, state.mode_epoch, state.mode)
        });

        self.epoch = epoch;
        self.last_outcome = outcome;

        if let TickOutcome::Advanced(_) | TickOutcome::ModeChanged(_) = outcome {
            crate::log_info!("state machine: {}", outcome);
        }

        let tick_ms = match mode {
            OperatingMode::Normal => NORMAL_TICK_MS,
            OperatingMode::Night => NIGHT_TICK_MS,
        };
        I::Duration::from_millis(u64::from(tick_ms))
    }

    /// Outcome of the most recent tick.
    pub fn last_outcome(&self) -> TickOutcome {
        self.last_outcome
    }
}

impl<I: TimeInstant> Default for StateMachine<I> {
    fn default() -> Self {
        Self::new()
    }
}
