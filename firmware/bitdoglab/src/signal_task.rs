use defmt::info;
use embassy_futures::select::{Either, select};
use embassy_time::Timer;
use traffic_signal::{StateMachine, TimeSource};

use crate::types::{EmbassyInstant, EmbassyTimeSource, SIGNAL};

#[embassy_executor::task]
pub async fn signal_task() {
    info!("State machine task started");

    let time_source = EmbassyTimeSource::new();
    let mut machine = StateMachine::<EmbassyInstant>::new();

    loop {
        let delay = machine.service(&SIGNAL, time_source.now());

        // A mode toggle cuts the dwell short.
        match select(Timer::after(delay.0), SIGNAL.wait_mode_change()).await {
            Either::First(_) => {}
            Either::Second(mode) => info!("Woken by mode change: {}", mode),
        }
    }
}
