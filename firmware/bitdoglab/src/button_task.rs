use defmt::info;
use embassy_rp::gpio::Input;
use embassy_time::Timer;
use traffic_signal::{ModeInputMonitor, TimeSource};

use crate::hardware::GpioButton;
use crate::types::{EmbassyInstant, EmbassyTimeSource, SIGNAL};

/// Polls the mode button (button A).
#[embassy_executor::task]
pub async fn mode_button_task(button: Input<'static>) {
    info!("Mode button task started");

    let time_source = EmbassyTimeSource::new();
    let mut monitor = ModeInputMonitor::<EmbassyInstant, _>::new(GpioButton::new(button));

    loop {
        let delay = monitor.service(&SIGNAL, time_source.now());
        Timer::after(delay.0).await;
    }
}

/// Reboots into the USB bootloader when button B is pressed.
#[embassy_executor::task]
pub async fn bootsel_task(mut button: Input<'static>) {
    info!("Bootloader button task started");

    button.wait_for_falling_edge().await;
    info!("Rebooting into USB bootloader");
    embassy_rp::rom_data::reset_to_usb_boot(0, 0);
}
