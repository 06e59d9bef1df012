//! Compile-time timing and hardware constants.
//!
//! Timing profiles are fixed at build time; there is no runtime
//! configuration surface.

/// Dwell time of the green phase.
pub const GREEN_DURATION_MS: u32 = 15_000;

/// Dwell time of the yellow phase.
pub const YELLOW_DURATION_MS: u32 = 5_000;

/// Dwell time of the red phase.
pub const RED_DURATION_MS: u32 = 15_000;

/// Final stretch of a phase during which the transition warning is raised.
pub const WARNING_WINDOW_MS: u32 = 3_000;

/// Half-period of the night-mode amber flash.
pub const NIGHT_FLASH_PERIOD_MS: u32 = 2_000;

/// Window after a night flash on-edge during which the buzzer may pulse.
pub const NIGHT_TONE_WINDOW_MS: u32 = 200;

/// State machine tick while cycling colors.
pub const NORMAL_TICK_MS: u32 = 100;

/// State machine tick while flashing.
pub const NIGHT_TICK_MS: u32 = 50;

/// LED panel refresh interval.
pub const PANEL_REFRESH_MS: u32 = 50;

/// Text display refresh interval.
pub const DISPLAY_REFRESH_MS: u32 = 100;

/// Status LED refresh interval, also its blink half-period.
pub const STATUS_BLINK_MS: u32 = 100;

/// Buzzer re-check interval while idle in night mode.
pub const TONE_IDLE_POLL_MS: u32 = 50;

/// Mode button poll interval.
pub const BUTTON_POLL_MS: u32 = 50;

/// Window after an accepted button edge during which further edges are ignored.
pub const DEBOUNCE_MS: u32 = 200;

/// PWM input clock (RP2040 system clock).
pub const PWM_BASE_CLOCK_HZ: u32 = 125_000_000;

/// Fixed PWM clock divider used for every tone.
pub const PWM_CLOCK_DIVIDER: u32 = 20;

/// Duty cycle of a sounding tone, in percent.
pub const TONE_DUTY_PERCENT: u8 = 50;

/// Number of pixels on the 5x5 LED panel.
pub const PANEL_PIXELS: usize = 25;

/// Full-scale channel value written to the LED panel.
pub const PANEL_BRIGHTNESS: u8 = 10;
