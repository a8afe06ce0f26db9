//! Timer Abstractions
//!
//! Periodic event sources for the sample trigger and the indicator tick.
//! The tick can be withheld by the enable gate; the sample trigger always
//! runs.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};

use crate::ports::TickControl;

/// Periodic event clock
pub struct PeriodicClock {
    ticker: Ticker,
}

impl PeriodicClock {
    /// Create a clock firing every `period_ms`
    #[must_use]
    pub fn from_period_ms(period_ms: u32) -> Self {
        Self {
            ticker: Ticker::every(Duration::from_millis(u64::from(period_ms))),
        }
    }

    /// Wait for the next period boundary
    pub async fn next(&mut self) {
        self.ticker.next().await;
    }

    /// Restart the period from now
    pub fn reset(&mut self) {
        self.ticker.reset();
    }
}

/// Gate for the indicator tick
///
/// While disabled the tick task parks instead of delivering events.
pub struct TickSwitch {
    enabled: AtomicBool,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl TickSwitch {
    /// Create a switch with tick delivery enabled
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            wake: Signal::new(),
        }
    }

    /// Check if tick events are delivered
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Wait until tick delivery is enabled
    pub async fn wait_enabled(&self) {
        while !self.is_enabled() {
            self.wake.wait().await;
        }
    }
}

impl Default for TickSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl TickControl for &'static TickSwitch {
    fn enable_tick(&mut self) {
        self.enabled.store(true, Ordering::Release);
        self.wake.signal(());
    }

    fn disable_tick(&mut self) {
        self.enabled.store(false, Ordering::Release);
    }
}
