//! Door sensor, release button and countdown tick sources.
//!
//! Each source is an async task that only bumps a counter in the shared
//! [`EventFlags`] and wakes the main loop. None of them touches the panel.

use defmt::{debug, info};
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker, Timer};
use washpanel::config::{EDGE_DEBOUNCE_MS, TICK_PERIOD_SECS};
use washpanel::events::EventFlags;

/// Pending events for the main loop.
pub static EVENTS: EventFlags = EventFlags::new();

/// Raised whenever something lands in [`EVENTS`].
pub static WAKE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Arms (`true`) or disarms the countdown tick.
pub static TICK_ARM: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// Which input an edge task watches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum EdgeSource {
    Door,
    Release,
}

/// Watch one active-low input and report debounced falling edges.
///
/// Waits for the pin to go low, debounces, raises the event, then waits for
/// the pin to come back up before listening again.
#[embassy_executor::task(pool_size = 2)]
pub async fn edge_task(pin: AnyPin, source: EdgeSource) -> ! {
    let mut input = Input::new(pin, Pull::Up);

    loop {
        input.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(EDGE_DEBOUNCE_MS)).await;

        if input.is_low() {
            debug!("input: {} edge", source);
            match source {
                EdgeSource::Door => EVENTS.raise_door_edge(),
                EdgeSource::Release => EVENTS.raise_release_press(),
            }
            WAKE.signal(());

            input.wait_for_rising_edge().await;
            Timer::after(Duration::from_millis(EDGE_DEBOUNCE_MS)).await;
        }
    }
}

/// One tick per [`TICK_PERIOD_SECS`] while armed.
#[embassy_executor::task]
pub async fn tick_task() -> ! {
    let mut armed = false;

    loop {
        if !armed {
            armed = TICK_ARM.wait().await;
            continue;
        }

        info!("tick: armed");
        let mut ticker = Ticker::every(Duration::from_secs(TICK_PERIOD_SECS));
        loop {
            match select(ticker.next(), TICK_ARM.wait()).await {
                Either::First(()) => {
                    EVENTS.raise_tick();
                    WAKE.signal(());
                }
                Either::Second(on) => {
                    armed = on;
                    break;
                }
            }
        }
        if !armed {
            info!("tick: disarmed");
        }
    }
}
