//! Uniform-color LED panel renderer.

use embassy_sync::blocking_mutex::raw::RawMutex;
use palette::Srgb;

use crate::config::PANEL_REFRESH_MS;
use crate::devices::LedPanel;
use crate::profile::{NIGHT_PROFILE, PANEL_OFF};
use crate::state::{SharedSignal, SignalState};
use crate::time::{TimeDuration, TimeInstant};
use crate::types::OperatingMode;

/// Panel color for `state`: the phase color in NORMAL mode, the amber
/// flash (or dark) in NIGHT mode.
pub fn panel_color<I>(state: &SignalState<I>) -> Srgb {
    match state.mode {
        OperatingMode::Normal => state.color.profile().panel_color,
        OperatingMode::Night if state.night_led_on => NIGHT_PROFILE.panel_color,
        OperatingMode::Night => PANEL_OFF,
    }
}

/// Drives the LED panel with one uniform frame per refresh.
pub struct ColorPanelRenderer<P: LedPanel> {
    panel: P,
    frame: Srgb,
}

impl<P: LedPanel> ColorPanelRenderer<P> {
    /// Creates the renderer and blanks the panel.
    pub fn new(mut panel: P) -> Self {
        panel.set_all_pixels(PANEL_OFF);

        Self {
            panel,
            frame: PANEL_OFF,
        }
    }

    /// Pushes the frame for the latest state and returns the refresh delay.
    pub fn service<M: RawMutex, I: TimeInstant>(
        &mut self,
        signal: &SharedSignal<M, I>,
    ) -> I::Duration {
        self.render(&signal.snapshot());
        I::Duration::from_millis(u64::from(PANEL_REFRESH_MS))
    }

    /// Pushes the frame for `state`.
    pub fn render<I>(&mut self, state: &SignalState<I>) {
        self.frame = panel_color(state);
        self.panel.set_all_pixels(self.frame);
    }

    /// Color of the last frame pushed.
    pub fn current_color(&self) -> Srgb {
        self.frame
    }

    /// The driven panel, for transports that send the frame themselves.
    pub fn panel(&self) -> &P {
        &self.panel
    }
}
