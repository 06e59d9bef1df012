//! Shared signal state and its synchronized holder.
//!
//! [`SignalState`] is the single record every component reads. Only the
//! [`StateMachine`](crate::StateMachine) and the
//! [`ModeInputMonitor`](crate::ModeInputMonitor) write it, always through
//! [`SharedSignal`], which hands out copied snapshots under a blocking mutex
//! so no reader ever sees a half-applied update.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

use crate::config::WARNING_WINDOW_MS;
use crate::time::TimeInstant;
use crate::types::{OperatingMode, SignalColor};

/// Snapshot of the intersection's signal state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalState<I> {
    /// Current operating mode.
    pub mode: OperatingMode,

    /// Current color. Only meaningful in [`OperatingMode::Normal`].
    pub color: SignalColor,

    /// Time spent in the current color since the last transition.
    pub elapsed_ms: u32,

    /// Planned dwell time of the current color.
    pub color_duration_ms: u32,

    /// Set while the current color is within its final warning window.
    pub warning_active: bool,

    /// Night flash phase. Meaningless in [`OperatingMode::Normal`].
    pub night_led_on: bool,

    /// Last time `night_led_on` flipped or the mode was toggled.
    pub night_phase_started_at: I,

    /// Incremented on every mode toggle.
    pub mode_epoch: u32,
}

impl<I: TimeInstant> SignalState<I> {
    /// Power-on state: NORMAL, GREEN, nothing elapsed.
    pub const fn new(now: I) -> Self {
        Self {
            mode: OperatingMode::Normal,
            color: SignalColor::Green,
            elapsed_ms: 0,
            color_duration_ms: SignalColor::Green.duration_ms(),
            warning_active: false,
            night_led_on: false,
            night_phase_started_at: now,
            mode_epoch: 0,
        }
    }

    /// Time left in the current color, clamped at zero.
    #[inline]
    pub fn remaining_ms(&self) -> u32 {
        self.color_duration_ms.saturating_sub(self.elapsed_ms)
    }

    /// Whole seconds left in the current color, rounded up.
    #[inline]
    pub fn seconds_remaining(&self) -> u32 {
        self.remaining_ms().div_ceil(1000)
    }

    /// Recomputes `warning_active` from the timing fields.
    pub fn refresh_warning(&mut self) {
        self.warning_active =
            self.mode == OperatingMode::Normal && self.remaining_ms() <= WARNING_WINDOW_MS;
    }

    /// Adds `delta_ms` to the current color's elapsed time.
    ///
    /// On reaching the planned duration the color advances to the next one in
    /// cyclic order and the timing restarts. Elapsed time is clamped to the
    /// duration, so a late tick causes at most one transition. Returns the new
    /// color if a transition happened. Does nothing in night mode.
    pub fn advance(&mut self, delta_ms: u32) -> Option<SignalColor> {
        if self.mode != OperatingMode::Normal {
            return None;
        }

        self.elapsed_ms = self
            .elapsed_ms
            .saturating_add(delta_ms)
            .min(self.color_duration_ms);

        if self.elapsed_ms >= self.color_duration_ms {
            self.color = self.color.next();
            self.color_duration_ms = self.color.duration_ms();
            self.elapsed_ms = 0;
            self.warning_active = false;
            return Some(self.color);
        }

        self.refresh_warning();
        None
    }

    /// Flips mode, applying the reset rules of a toggle atomically.
    ///
    /// Returns the new mode.
    pub fn toggle_mode(&mut self, now: I) -> OperatingMode {
        let previous = self.mode;
        self.mode = previous.toggled();

        if previous == OperatingMode::Night {
            self.color = SignalColor::Green;
            self.color_duration_ms = SignalColor::Green.duration_ms();
        }

        self.elapsed_ms = 0;
        self.warning_active = false;
        self.night_led_on = false;
        self.night_phase_started_at = now;
        self.mode_epoch = self.mode_epoch.wrapping_add(1);

        self.mode
    }

    /// Flips the night flash phase and stamps the flip time.
    pub fn toggle_night_led(&mut self, now: I) -> bool {
        self.night_led_on = !self.night_led_on;
        self.night_phase_started_at = now;
        self.night_led_on
    }
}

/// Synchronized holder for the process-wide [`SignalState`].
///
/// Readers take copied snapshots; writers apply closures under the lock. A
/// mode toggle additionally fires a signal that a dwell wait can select on.
pub struct SharedSignal<M: RawMutex, I: TimeInstant> {
    state: Mutex<M, Cell<SignalState<I>>>,
    mode_changed: Signal<M, OperatingMode>,
}

impl<M: RawMutex, I: TimeInstant> SharedSignal<M, I> {
    /// Creates the holder in the power-on state.
    pub const fn new(now: I) -> Self {
        Self {
            state: Mutex::new(Cell::new(SignalState::new(now))),
            mode_changed: Signal::new(),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SignalState<I> {
        self.state.lock(|cell| cell.get())
    }

    /// Current operating mode.
    pub fn mode(&self) -> OperatingMode {
        self.snapshot().mode
    }

    /// Applies `f` to the state under the lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut SignalState<I>) -> R) -> R {
        self.state.lock(|cell| {
            let mut state = cell.get();
            let result = f(&mut state);
            cell.set(state);
            result
        })
    }

    /// Toggles the operating mode and wakes any pending
    /// [`wait_mode_change`](Self::wait_mode_change).
    pub fn toggle_mode(&self, now: I) -> OperatingMode {
        let mode = self.update(|state| state.toggle_mode(now));
        self.mode_changed.signal(mode);
        mode
    }

    /// Waits until the next mode toggle, returning the new mode.
    ///
    /// A toggle that happened since the previous wait completes immediately.
    pub async fn wait_mode_change(&self) -> OperatingMode {
        self.mode_changed.wait().await
    }

    /// Drops a pending mode-change notification.
    pub fn clear_mode_change(&self) {
        self.mode_changed.reset();
    }
}
