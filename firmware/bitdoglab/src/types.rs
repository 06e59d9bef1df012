use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use traffic_signal::SharedSignal;

pub use crate::time_wrapper::{EmbassyDuration, EmbassyInstant, EmbassyTimeSource};

/// Every task runs on the thread-mode executor, so the state never crosses
/// an interrupt boundary.
pub type Shared = SharedSignal<ThreadModeRawMutex, EmbassyInstant>;

/// The one signal state, written by the state machine and mode button tasks
/// and read by every renderer task.
pub static SIGNAL: Shared = SharedSignal::new(EmbassyInstant::BOOT);
