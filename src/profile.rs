//! Per-state presentation table.
//!
//! Every renderer looks up what it shows here instead of matching on the
//! signal color itself, so one row describes everything a color looks and
//! sounds like.

use crate::tone::TonePattern;
use crate::types::SignalColor;
use palette::Srgb;

/// Panel color for the green phase.
pub const PANEL_GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);

/// Panel color for the yellow phase and the night flash.
pub const PANEL_AMBER: Srgb = Srgb::new(1.0, 1.0, 0.0);

/// Panel color for the red phase.
pub const PANEL_RED: Srgb = Srgb::new(1.0, 0.0, 0.0);

/// All pixels dark.
pub const PANEL_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);

/// Which channels of the discrete RGB status LED light up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedMask {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl LedMask {
    /// Every channel off.
    pub const OFF: Self = Self::new(false, false, false);

    #[inline]
    pub const fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }

    /// This mask if `on`, otherwise [`LedMask::OFF`].
    #[inline]
    pub const fn gated(self, on: bool) -> Self {
        if on { self } else { Self::OFF }
    }
}

/// Everything the feedback devices present for one signal state.
#[derive(Debug, Clone, Copy)]
pub struct SignalProfile {
    /// Uniform color of the LED panel.
    pub panel_color: Srgb,

    /// Status LED channels while the warning blink is lit.
    pub status_led: LedMask,

    /// Buzzer cadence.
    pub tone: TonePattern,

    /// Status word on the text display.
    pub status_text: &'static str,

    /// Horizontal position of the status word, centred for its length.
    pub status_x: i32,
}

static GREEN_PROFILE: SignalProfile = SignalProfile {
    panel_color: PANEL_GREEN,
    status_led: LedMask::new(false, true, false),
    tone: TonePattern::new(1_000, 100, 900),
    status_text: "Siga",
    status_x: 45,
};

static YELLOW_PROFILE: SignalProfile = SignalProfile {
    panel_color: PANEL_AMBER,
    status_led: LedMask::new(true, true, false),
    tone: TonePattern::new(1_200, 100, 100),
    status_text: "Atencao",
    status_x: 35,
};

static RED_PROFILE: SignalProfile = SignalProfile {
    panel_color: PANEL_RED,
    status_led: LedMask::new(true, false, false),
    tone: TonePattern::new(1_500, 500, 1_500),
    status_text: "Pare",
    status_x: 45,
};

/// Night flash presentation. The tone is a single pulse; the status LED
/// stays dark in night mode.
pub const NIGHT_PROFILE: SignalProfile = SignalProfile {
    panel_color: PANEL_AMBER,
    status_led: LedMask::OFF,
    tone: TonePattern::new(800, 200, 0),
    status_text: "Atencao",
    status_x: 35,
};

impl SignalColor {
    /// Presentation row for this color.
    #[inline]
    pub fn profile(self) -> &'static SignalProfile {
        match self {
            SignalColor::Green => &GREEN_PROFILE,
            SignalColor::Yellow => &YELLOW_PROFILE,
            SignalColor::Red => &RED_PROFILE,
        }
    }
}
