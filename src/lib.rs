#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SignalState`**: The one record every component reads: mode, color, dwell timing, warning and night flash phase
//! - **`SharedSignal`**: Mutex-guarded holder for the state, handing out copied snapshots
//! - **`StateMachine`**: Advances the color cycle and the night flash from elapsed time
//! - **`ModeInputMonitor`**: Debounces the mode button and toggles NORMAL/NIGHT
//! - **`ColorPanelRenderer`**, **`DisplayRenderer`**, **`StatusLedBlinker`**, **`ToneSequencer`**: Readers that re-derive their device output from the latest snapshot
//! - **`SignalProfile`**: Per-color presentation row (panel color, status LED, tone, text)
//! - **`LedPanel`**, **`TextDisplay`**, **`ToneOutput`**, **`StatusLed`**, **`ModeButton`**: Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Every `service()` call takes the current instant and returns how long to
//! wait before calling it again, so each component maps onto one timer-driven
//! task.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

#[macro_use]
mod logging;

pub mod config;
pub mod devices;
pub mod display;
pub mod input;
pub mod machine;
pub mod panel;
pub mod profile;
pub mod state;
pub mod status_led;
pub mod time;
pub mod tone;
pub mod types;

pub use devices::{LedPanel, ModeButton, StatusLed, TextDisplay, ToneOutput};
pub use display::{DisplayFrame, DisplayLine, DisplayRenderer};
pub use input::{InputEvent, ModeInputMonitor};
pub use machine::{StateMachine, TickOutcome};
pub use panel::ColorPanelRenderer;
pub use profile::{LedMask, NIGHT_PROFILE, SignalProfile};
pub use state::{SharedSignal, SignalState};
pub use status_led::StatusLedBlinker;
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use tone::{PwmTone, ToneLevel, TonePattern, ToneSequencer};
pub use types::{OperatingMode, SignalColor, ToneError};
