use std::sync::Arc;
use std::thread;

use rdev::{listen, Event, EventType};

use crate::app::AppState;

/// Starts the OS-global wheel listener on its own thread. `rdev::listen`
/// blocks for the life of the process, so the thread is detached and dies
/// with it.
pub fn spawn(state: Arc<AppState>) {
    thread::spawn(move || {
        let callback = move |event: Event| {
            if let EventType::Wheel { delta_y, .. } = event.event_type {
                // One tick per event regardless of delta magnitude
                if delta_y > 0 {
                    state.session.record_up();
                } else if delta_y < 0 {
                    state.session.record_down();
                }
            }
        };

        if let Err(e) = listen(callback) {
            log::error!("Scroll listener stopped: {:?}", e);
        }
    });
}
