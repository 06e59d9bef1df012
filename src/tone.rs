//! Buzzer cadence patterns and the sequencer that plays them.
//!
//! A [`TonePattern`] is one cycle of tone followed by silence. The
//! [`ToneSequencer`] plays exactly one cycle at a time and only consults the
//! shared state at cycle boundaries, so a mode switch during a long silence is
//! picked up when that silence ends rather than after some longer pattern.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::{
    NIGHT_TONE_WINDOW_MS, PWM_BASE_CLOCK_HZ, PWM_CLOCK_DIVIDER, TONE_DUTY_PERCENT,
    TONE_IDLE_POLL_MS,
};
use crate::devices::ToneOutput;
use crate::profile::NIGHT_PROFILE;
use crate::state::{SharedSignal, SignalState};
use crate::time::{TimeDuration, TimeInstant, millis_between};
use crate::types::{OperatingMode, ToneError};

/// What the buzzer is doing at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneLevel {
    /// Buzzer driven at the given frequency.
    Sounding(u32),

    /// Buzzer stopped.
    Silent,
}

/// One tone-then-silence cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TonePattern {
    frequency_hz: u32,
    tone_ms: u32,
    silence_ms: u32,
}

impl TonePattern {
    /// Creates a pattern. A zero `tone_ms` makes a silent poll cycle.
    #[inline]
    pub const fn new(frequency_hz: u32, tone_ms: u32, silence_ms: u32) -> Self {
        Self {
            frequency_hz,
            tone_ms,
            silence_ms,
        }
    }

    /// A cycle that stays silent for `duration_ms`.
    #[inline]
    pub const fn silence(duration_ms: u32) -> Self {
        Self::new(0, 0, duration_ms)
    }

    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    pub fn tone_ms(&self) -> u32 {
        self.tone_ms
    }

    pub fn silence_ms(&self) -> u32 {
        self.silence_ms
    }

    /// Length of one full cycle.
    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.tone_ms.saturating_add(self.silence_ms)
    }

    /// Evaluates the pattern at `elapsed_ms` into the cycle.
    ///
    /// # Returns
    /// * `(level, Some(ms))` - Buzzer level now and time until the next change
    /// * `(Silent, None)` - The cycle is over
    pub fn evaluate(&self, elapsed_ms: u32) -> (ToneLevel, Option<u32>) {
        if elapsed_ms < self.tone_ms {
            return (
                ToneLevel::Sounding(self.frequency_hz),
                Some(self.tone_ms - elapsed_ms),
            );
        }

        let period = self.period_ms();
        if elapsed_ms < period {
            return (ToneLevel::Silent, Some(period - elapsed_ms));
        }

        (ToneLevel::Silent, None)
    }

    /// The cycle to play for `state`, observed at `now`.
    ///
    /// In night mode the pulse is only emitted within the tone window right
    /// after the flash turned on; otherwise the buzzer idles and re-checks.
    pub fn for_state<I: TimeInstant>(state: &SignalState<I>, now: I) -> Self {
        match state.mode {
            OperatingMode::Normal => state.color.profile().tone,
            OperatingMode::Night => {
                let since_flip = millis_between(state.night_phase_started_at, now);
                if state.night_led_on && since_flip < NIGHT_TONE_WINDOW_MS {
                    NIGHT_PROFILE.tone
                } else {
                    Self::silence(TONE_IDLE_POLL_MS)
                }
            }
        }
    }
}

/// PWM slice settings that realize a tone frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTone {
    /// Clock divider applied to the PWM input clock.
    pub divider: u32,

    /// Counter wrap (TOP) value.
    pub wrap: u16,

    /// Channel compare level for the configured duty cycle.
    pub compare: u16,
}

impl PwmTone {
    /// Computes settings for `frequency_hz` with the fixed base clock and divider.
    pub fn for_frequency(frequency_hz: u32) -> Result<Self, ToneError> {
        Self::with_clock(PWM_BASE_CLOCK_HZ, PWM_CLOCK_DIVIDER, frequency_hz)
    }

    /// Computes `wrap = base_clock / (frequency * divider) - 1` using truncating
    /// integer division, and the compare level for a
    /// [`TONE_DUTY_PERCENT`] duty.
    pub fn with_clock(
        base_clock_hz: u32,
        divider: u32,
        frequency_hz: u32,
    ) -> Result<Self, ToneError> {
        if frequency_hz == 0 {
            return Err(ToneError::ZeroFrequency);
        }

        let ticks_per_period =
            u64::from(base_clock_hz) / (u64::from(frequency_hz) * u64::from(divider.max(1)));
        let wrap = ticks_per_period
            .checked_sub(1)
            .filter(|wrap| *wrap > 0)
            .ok_or(ToneError::FrequencyTooHigh(frequency_hz))?;
        let wrap = u16::try_from(wrap).map_err(|_| ToneError::WrapOverflow(frequency_hz))?;

        Ok(Self {
            divider: divider.max(1),
            wrap,
            compare: duty_compare(wrap, TONE_DUTY_PERCENT),
        })
    }
}

/// Compare level for `percent` duty on a counter wrapping at `wrap`.
#[inline]
pub fn duty_compare(wrap: u16, percent: u8) -> u16 {
    let percent = u32::from(percent.min(100));
    // Half duty must land on `wrap / 2` exactly.
    ((u32::from(wrap) * percent) / 100) as u16
}

#[derive(Debug, Clone, Copy)]
struct ToneCycle<I> {
    pattern: TonePattern,
    started_at: I,
}

/// Plays the buzzer cadence for the current signal state.
///
/// # Type Parameters
/// * `I` - Time instant type
/// * `B` - Buzzer implementation type
pub struct ToneSequencer<I: TimeInstant, B: ToneOutput> {
    buzzer: B,
    cycle: Option<ToneCycle<I>>,
    level: ToneLevel,
}

impl<I: TimeInstant, B: ToneOutput> ToneSequencer<I, B> {
    /// Creates an idle sequencer with the buzzer stopped.
    pub fn new(mut buzzer: B) -> Self {
        buzzer.stop();

        Self {
            buzzer,
            cycle: None,
            level: ToneLevel::Silent,
        }
    }

    /// Advances the current cycle, starting a new one from a fresh snapshot
    /// once it has finished.
    ///
    /// Returns the delay until the next level change.
    pub fn service<M: RawMutex>(&mut self, signal: &SharedSignal<M, I>, now: I) -> I::Duration {
        if let Some(cycle) = self.cycle {
            let elapsed = millis_between(cycle.started_at, now);
            let (level, next) = cycle.pattern.evaluate(elapsed);
            self.apply(level);

            if let Some(remaining) = next {
                return I::Duration::from_millis(u64::from(remaining));
            }
        }

        let pattern = TonePattern::for_state(&signal.snapshot(), now);
        self.cycle = Some(ToneCycle {
            pattern,
            started_at: now,
        });

        let (level, next) = pattern.evaluate(0);
        self.apply(level);
        I::Duration::from_millis(u64::from(next.unwrap_or(TONE_IDLE_POLL_MS)))
    }

    /// Level currently driven on the buzzer.
    pub fn level(&self) -> ToneLevel {
        self.level
    }

    /// Pattern of the cycle in progress, if any.
    pub fn current_pattern(&self) -> Option<TonePattern> {
        self.cycle.map(|cycle| cycle.pattern)
    }

    fn apply(&mut self, level: ToneLevel) {
        if level == self.level {
            return;
        }

        match level {
            ToneLevel::Sounding(hz) => {
                self.buzzer.set_frequency(hz);
                self.buzzer.set_duty(TONE_DUTY_PERCENT);
            }
            ToneLevel::Silent => self.buzzer.stop(),
        }
        self.level = level;
    }
}
