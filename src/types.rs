//! Core signal types.

use crate::config::{GREEN_DURATION_MS, RED_DURATION_MS, YELLOW_DURATION_MS};

/// The color shown by the signal head while cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalColor {
    /// Traffic may proceed.
    Green,

    /// Phase is ending, prepare to stop.
    Yellow,

    /// Traffic must stop.
    Red,
}

impl SignalColor {
    /// Next color in the cyclic order GREEN -> YELLOW -> RED -> GREEN.
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            SignalColor::Green => SignalColor::Yellow,
            SignalColor::Yellow => SignalColor::Red,
            SignalColor::Red => SignalColor::Green,
        }
    }

    /// Planned dwell time of this color.
    #[inline]
    pub const fn duration_ms(self) -> u32 {
        match self {
            SignalColor::Green => GREEN_DURATION_MS,
            SignalColor::Yellow => YELLOW_DURATION_MS,
            SignalColor::Red => RED_DURATION_MS,
        }
    }
}

/// How the intersection is being operated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Full GREEN/YELLOW/RED cycling.
    #[default]
    Normal,

    /// Degraded flashing-caution mode.
    Night,
}

impl OperatingMode {
    /// The other mode.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            OperatingMode::Normal => OperatingMode::Night,
            OperatingMode::Night => OperatingMode::Normal,
        }
    }
}

/// Errors computing PWM settings for a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneError {
    /// A frequency of zero cannot be generated.
    ZeroFrequency,

    /// Frequency is too high for the divider, the wrap value would underflow.
    FrequencyTooHigh(u32),

    /// Frequency is too low, the wrap value does not fit the 16-bit counter.
    WrapOverflow(u32),
}

impl core::fmt::Display for ToneError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ToneError::ZeroFrequency => {
                write!(f, "tone frequency must be non-zero")
            }
            ToneError::FrequencyTooHigh(hz) => {
                write!(f, "tone frequency {} Hz is too high for the PWM divider", hz)
            }
            ToneError::WrapOverflow(hz) => {
                write!(
                    f,
                    "tone frequency {} Hz needs a PWM wrap value wider than 16 bits",
                    hz
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ToneError {}
