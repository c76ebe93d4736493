//! Periodic tick source for [`Controller::tick`](crate::app::service::Controller::tick).
//!
//! On ESP-IDF the callback runs on the esp_timer task via
//! `EspTaskTimerService` (task context, not ISR), so it may take the
//! controller's critical sections and drive GPIOs.
//! On simulation targets a std thread sleeps between calls.
//!
//! The timer stops when the returned [`TickTimer`] is dropped.

use core::time::Duration;

use log::info;

#[cfg(feature = "espidf")]
use esp_idf_svc::timer::{EspTaskTimerService, EspTimer};

#[cfg(not(feature = "espidf"))]
use std::sync::Arc;
#[cfg(not(feature = "espidf"))]
use std::sync::atomic::{AtomicBool, Ordering};

/// Handle to a running periodic tick.
pub struct TickTimer {
    #[cfg(feature = "espidf")]
    _timer: EspTimer<'static>,
    #[cfg(not(feature = "espidf"))]
    stop: Arc<AtomicBool>,
    #[cfg(not(feature = "espidf"))]
    thread: Option<std::thread::JoinHandle<()>>,
}

/// Call `on_tick` every `period_ms` until the handle is dropped.
#[cfg(feature = "espidf")]
pub fn start<F>(period_ms: u32, on_tick: F) -> anyhow::Result<TickTimer>
where
    F: FnMut() + Send + 'static,
{
    let service = EspTaskTimerService::new()?;
    let timer = service.timer(on_tick)?;
    timer.every(Duration::from_millis(u64::from(period_ms)))?;
    info!("hw_timer: tick every {period_ms} ms");
    Ok(TickTimer { _timer: timer })
}

#[cfg(not(feature = "espidf"))]
pub fn start<F>(period_ms: u32, mut on_tick: F) -> anyhow::Result<TickTimer>
where
    F: FnMut() + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let flag = stop.clone();
    let period = Duration::from_millis(u64::from(period_ms));
    let thread = std::thread::Builder::new()
        .name("tick".into())
        .spawn(move || {
            while !flag.load(Ordering::Acquire) {
                std::thread::sleep(period);
                if flag.load(Ordering::Acquire) {
                    break;
                }
                on_tick();
            }
        })?;
    info!("hw_timer(sim): tick every {period_ms} ms");
    Ok(TickTimer {
        stop,
        thread: Some(thread),
    })
}

#[cfg(not(feature = "espidf"))]
impl Drop for TickTimer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(t) = self.thread.take() {
            let _ = t.join();
        }
    }
}
