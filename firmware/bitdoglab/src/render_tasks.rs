//! One task per renderer. Each re-reads the shared state on its own period.

use defmt::info;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use embassy_time::Timer;
use traffic_signal::config::PANEL_PIXELS;
use traffic_signal::{
    ColorPanelRenderer, DisplayRenderer, StatusLedBlinker, TimeSource, ToneSequencer,
};

use crate::hardware::{OledDisplay, PanelFrame, PwmBuzzer, RgbStatusLed};
use crate::types::{EmbassyInstant, EmbassyTimeSource, SIGNAL};

pub type PanelDriver = PioWs2812<'static, PIO0, 0, PANEL_PIXELS>;

#[embassy_executor::task]
pub async fn panel_task(mut ws2812: PanelDriver) {
    info!("Panel task started");

    let mut renderer = ColorPanelRenderer::new(PanelFrame::new());

    loop {
        let delay = renderer.service(&SIGNAL);
        ws2812.write(renderer.panel().pixels()).await;
        Timer::after(delay.0).await;
    }
}

#[embassy_executor::task]
pub async fn display_task(display: OledDisplay) {
    info!("Display task started");

    let mut renderer = DisplayRenderer::new(display);

    loop {
        let delay = renderer.service(&SIGNAL);
        Timer::after(delay.0).await;
    }
}

#[embassy_executor::task]
pub async fn status_led_task(led: RgbStatusLed) {
    info!("Status LED task started");

    let mut blinker = StatusLedBlinker::new(led);

    loop {
        let delay = blinker.service(&SIGNAL);
        Timer::after(delay.0).await;
    }
}

#[embassy_executor::task]
pub async fn tone_task(buzzer: PwmBuzzer) {
    info!("Tone task started");

    let time_source = EmbassyTimeSource::new();
    let mut sequencer = ToneSequencer::<EmbassyInstant, _>::new(buzzer);

    loop {
        let delay = sequencer.service(&SIGNAL, time_source.now());
        Timer::after(delay.0).await;
    }
}
