//! Device trait implementations over the BitDogLab peripherals.

use defmt::warn;
use embassy_rp::gpio::{Input, Level, Output};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use palette::Srgb;
use smart_leds::RGB8;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};
use traffic_signal::config::{PANEL_BRIGHTNESS, PANEL_PIXELS};
use traffic_signal::tone::duty_compare;
use traffic_signal::{LedPanel, ModeButton, PwmTone, StatusLed, TextDisplay, ToneOutput};

// ============================================================================
// LED panel (5x5 WS2812 matrix)
// ============================================================================

/// Frame buffer for the WS2812 matrix. The panel task sends it over PIO
/// after each render.
pub struct PanelFrame {
    pixels: [RGB8; PANEL_PIXELS],
}

impl PanelFrame {
    pub fn new() -> Self {
        Self {
            pixels: [RGB8::default(); PANEL_PIXELS],
        }
    }

    pub fn pixels(&self) -> &[RGB8; PANEL_PIXELS] {
        &self.pixels
    }

    /// Convert float (0.0-1.0) to a channel level at panel brightness
    fn scale(value: f32) -> u8 {
        (value.clamp(0.0, 1.0) * PANEL_BRIGHTNESS as f32) as u8
    }
}

impl LedPanel for PanelFrame {
    fn set_all_pixels(&mut self, color: Srgb) {
        let pixel = RGB8::new(
            Self::scale(color.red),
            Self::scale(color.green),
            Self::scale(color.blue),
        );
        self.pixels = [pixel; PANEL_PIXELS];
    }
}

// ============================================================================
// OLED (SSD1306 over I2C1)
// ============================================================================

pub type OledDriver = Ssd1306<
    I2CInterface<I2c<'static, I2C1, Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

pub struct OledDisplay {
    display: OledDriver,
    style: MonoTextStyle<'static, BinaryColor>,
}

impl OledDisplay {
    /// Initializes the controller at the default 0x3C address.
    pub fn new(i2c: I2c<'static, I2C1, Blocking>) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        if display.init().is_err() {
            warn!("SSD1306 init failed");
        }

        Self {
            display,
            style: MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
        }
    }
}

impl TextDisplay for OledDisplay {
    fn clear(&mut self) {
        self.display.clear_buffer();
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let origin = Point::new(x, y);
        if Text::with_baseline(text, origin, self.style, Baseline::Top)
            .draw(&mut self.display)
            .is_err()
        {
            warn!("text draw failed");
        }
    }

    fn flush(&mut self) {
        if self.display.flush().is_err() {
            warn!("display flush failed");
        }
    }
}

// ============================================================================
// Buzzer (PWM slice 5, channel A)
// ============================================================================

pub struct PwmBuzzer {
    pwm: Pwm<'static>,
    config: PwmConfig,
    tone: Option<PwmTone>,
}

impl PwmBuzzer {
    pub fn new(pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.compare_a = 0;

        let mut buzzer = Self {
            pwm,
            config,
            tone: None,
        };
        buzzer.apply();
        buzzer
    }

    fn apply(&mut self) {
        self.pwm.set_config(&self.config);
    }
}

impl ToneOutput for PwmBuzzer {
    fn set_frequency(&mut self, hz: u32) {
        match PwmTone::for_frequency(hz) {
            Ok(tone) => {
                self.config.divider = u8::try_from(tone.divider).unwrap_or(u8::MAX).into();
                self.config.top = tone.wrap;
                self.tone = Some(tone);
                self.apply();
            }
            Err(e) => {
                warn!("tone {} Hz rejected: {}", hz, e);
                self.stop();
            }
        }
    }

    fn set_duty(&mut self, percent: u8) {
        if let Some(tone) = self.tone {
            self.config.compare_a = duty_compare(tone.wrap, percent);
            self.apply();
        }
    }

    fn stop(&mut self) {
        self.config.compare_a = 0;
        self.apply();
    }
}

// ============================================================================
// Status LED and mode button (GPIO)
// ============================================================================

pub struct RgbStatusLed {
    red: Output<'static>,
    green: Output<'static>,
    blue: Output<'static>,
}

impl RgbStatusLed {
    pub fn new(red: Output<'static>, green: Output<'static>, blue: Output<'static>) -> Self {
        Self { red, green, blue }
    }
}

impl StatusLed for RgbStatusLed {
    fn set(&mut self, red: bool, green: bool, blue: bool) {
        self.red.set_level(Level::from(red));
        self.green.set_level(Level::from(green));
        self.blue.set_level(Level::from(blue));
    }
}

pub struct GpioButton {
    pin: Input<'static>,
}

impl GpioButton {
    pub fn new(pin: Input<'static>) -> Self {
        Self { pin }
    }
}

impl ModeButton for GpioButton {
    fn read_button(&mut self) -> bool {
        self.pin.is_high()
    }
}
