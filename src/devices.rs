//! Hardware abstraction for the signal's feedback and input devices.
//!
//! Implement these for your board (GPIO, PWM, PIO, I2C, ...) so the renderers
//! can drive it. Methods cannot fail: implementations handle hardware errors
//! internally, since every renderer simply refreshes again on its next cycle.

use palette::Srgb;

/// Addressable LED panel showing one uniform color.
pub trait LedPanel {
    /// Pushes a frame with every pixel set to `color`.
    ///
    /// Color components are in the range 0.0-1.0. Implementations should
    /// scale these to their strip's brightness and byte order.
    fn set_all_pixels(&mut self, color: Srgb);
}

/// Monochrome text display with an off-screen frame buffer.
pub trait TextDisplay {
    /// Clears the frame buffer.
    fn clear(&mut self);

    /// Draws `text` into the frame buffer with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32);

    /// Sends the frame buffer to the panel.
    fn flush(&mut self);
}

/// PWM-driven buzzer.
pub trait ToneOutput {
    /// Retunes the PWM to `hz` without changing the output level.
    fn set_frequency(&mut self, hz: u32);

    /// Sets the output duty cycle, in percent.
    fn set_duty(&mut self, percent: u8);

    /// Silences the buzzer.
    fn stop(&mut self);
}

/// Discrete RGB status LED with on/off channels.
pub trait StatusLed {
    fn set(&mut self, red: bool, green: bool, blue: bool);
}

/// The mode push button.
pub trait ModeButton {
    /// Raw pin level. The button is active-low with a pull-up, so `false`
    /// means pressed.
    fn read_button(&mut self) -> bool;
}
