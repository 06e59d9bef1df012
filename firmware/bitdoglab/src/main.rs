#![no_std]
#![no_main]

use core::future::pending;
use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::{Peripherals, bind_interrupts};
use {defmt_rtt as _, panic_probe as _};

mod button_task;
mod hardware;
mod render_tasks;
mod signal_task;
mod time_wrapper;
mod types;

use button_task::{bootsel_task, mode_button_task};
use hardware::{OledDisplay, PwmBuzzer, RgbStatusLed};
use render_tasks::{PanelDriver, display_task, panel_task, status_led_task, tone_task};
use signal_task::signal_task;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

/// WS2812 5x5 matrix on GPIO 7, driven by PIO0 state machine 0
fn setup_panel(p: &mut Peripherals) -> PanelDriver {
    let pio0 = unsafe { p.PIO0.clone_unchecked() };
    let dma = unsafe { p.DMA_CH0.clone_unchecked() };
    let pin = unsafe { p.PIN_7.clone_unchecked() };

    let Pio {
        mut common, sm0, ..
    } = Pio::new(pio0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    PioWs2812::new(&mut common, sm0, dma, pin, &program)
}

/// SSD1306 on I2C1 (SDA GPIO 14, SCL GPIO 15) at 400 kHz
fn setup_display(p: &mut Peripherals) -> OledDisplay {
    let i2c1 = unsafe { p.I2C1.clone_unchecked() };
    let sda = unsafe { p.PIN_14.clone_unchecked() };
    let scl = unsafe { p.PIN_15.clone_unchecked() };

    let mut config = i2c::Config::default();
    config.frequency = 400_000;

    OledDisplay::new(I2c::new_blocking(i2c1, scl, sda, config))
}

/// Buzzer on GPIO 10 (PWM slice 5, channel A), silent until the first tone
fn setup_buzzer(p: &mut Peripherals) -> PwmBuzzer {
    let slice = unsafe { p.PWM_SLICE5.clone_unchecked() };
    let pin = unsafe { p.PIN_10.clone_unchecked() };

    PwmBuzzer::new(Pwm::new_output_a(slice, pin, PwmConfig::default()))
}

/// Discrete RGB LED: red GPIO 13, green GPIO 11, blue GPIO 12
fn setup_status_led(p: &mut Peripherals) -> RgbStatusLed {
    let red = unsafe { p.PIN_13.clone_unchecked() };
    let green = unsafe { p.PIN_11.clone_unchecked() };
    let blue = unsafe { p.PIN_12.clone_unchecked() };

    RgbStatusLed::new(
        Output::new(red, Level::Low),
        Output::new(green, Level::Low),
        Output::new(blue, Level::Low),
    )
}

/// Button A (mode) on GPIO 5 and button B (bootloader) on GPIO 6, active low
fn setup_buttons(p: &mut Peripherals) -> (Input<'static>, Input<'static>) {
    let mode = unsafe { p.PIN_5.clone_unchecked() };
    let bootsel = unsafe { p.PIN_6.clone_unchecked() };

    (Input::new(mode, Pull::Up), Input::new(bootsel, Pull::Up))
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Starting...");

    let mut p = embassy_rp::init(Default::default());

    // Setup hardware
    let panel = setup_panel(&mut p);
    let display = setup_display(&mut p);
    let buzzer = setup_buzzer(&mut p);
    let status_led = setup_status_led(&mut p);
    let (mode_button, bootsel_button) = setup_buttons(&mut p);

    // Spawn tasks
    spawner.spawn(signal_task()).unwrap();
    spawner.spawn(mode_button_task(mode_button)).unwrap();
    spawner.spawn(bootsel_task(bootsel_button)).unwrap();
    spawner.spawn(panel_task(panel)).unwrap();
    spawner.spawn(display_task(display)).unwrap();
    spawner.spawn(status_led_task(status_led)).unwrap();
    spawner.spawn(tone_task(buzzer)).unwrap();

    info!("Ready!");

    // Main task has no more work to do - all logic is in spawned tasks
    pending::<()>().await;
}
