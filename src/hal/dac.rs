//! DAC Driver
//!
//! Tone output on DAC1 channel 1. A playback task streams the armed
//! [`WaveBuffer`] to the channel one level per refresh period, wrapping at
//! the end, for as long as playback is not halted.
//!
//! The channel is shared between the playback task and the enable gate
//! (which forces it to zero), so it sits behind a critical-section mutex.

use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embassy_stm32::dac::{DacCh1, Value};
use embassy_stm32::peripherals::DAC1;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};

use crate::config::{refresh_period_us, DAC_CLOCK_HZ};
use crate::output::waveform::WaveBuffer;
use crate::ports::WaveformOutput;

/// The tone channel type used by this board
pub type ToneChannel = DacCh1<'static, DAC1>;

/// Playback state shared by the tone task and its controllers
pub struct TonePlayback {
    channel: Mutex<CriticalSectionRawMutex, RefCell<Option<ToneChannel>>>,
    buffer: Mutex<CriticalSectionRawMutex, Cell<Option<&'static WaveBuffer>>>,
    interval: AtomicU32,
    halted: AtomicBool,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl TonePlayback {
    /// Create an unarmed, halted player
    #[must_use]
    pub const fn new() -> Self {
        Self {
            channel: Mutex::new(RefCell::new(None)),
            buffer: Mutex::new(Cell::new(None)),
            interval: AtomicU32::new(0),
            halted: AtomicBool::new(true),
            wake: Signal::new(),
        }
    }

    /// Hand the DAC channel to the player
    pub fn install(&self, mut channel: ToneChannel) {
        channel.set_enable(true);
        self.channel.lock(|c| c.replace(Some(channel)));
    }

    /// Check if streaming is stopped
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Acquire)
    }

    fn set_level(&self, level: u16) {
        self.channel.lock(|c| {
            if let Some(channel) = c.borrow_mut().as_mut() {
                channel.set(Value::Bit12Right(level));
            }
        });
    }

    /// Stream the armed buffer; never returns
    ///
    /// Waits until the buffer is armed. While halted it parks on the wake
    /// signal and resumes from the level it stopped at.
    pub async fn run(&'static self) -> ! {
        let buffer = loop {
            if let Some(buffer) = self.buffer.lock(Cell::get) {
                break buffer;
            }
            self.wake.wait().await;
        };

        let period_us = refresh_period_us(self.interval.load(Ordering::Acquire), DAC_CLOCK_HZ);
        let mut ticker = Ticker::every(Duration::from_micros(u64::from(period_us.max(1))));
        let mut index = 0;

        loop {
            if self.is_halted() {
                self.wake.wait().await;
                ticker.reset();
                continue;
            }

            // The gate may halt between the check and the write; re-check
            // under the lock so a zeroed output is never overwritten
            self.channel.lock(|c| {
                if self.is_halted() {
                    return;
                }
                if let (Some(channel), Some(level)) = (c.borrow_mut().as_mut(), buffer.level(index)) {
                    channel.set(Value::Bit12Right(level));
                }
            });
            index = (index + 1) % buffer.len();
            ticker.next().await;
        }
    }
}

impl Default for TonePlayback {
    fn default() -> Self {
        Self::new()
    }
}

/// Control handle for the shared player
#[derive(Clone, Copy)]
pub struct ToneDac {
    playback: &'static TonePlayback,
}

impl ToneDac {
    /// Create a handle to `playback`
    #[must_use]
    pub const fn new(playback: &'static TonePlayback) -> Self {
        Self { playback }
    }
}

impl WaveformOutput for ToneDac {
    fn arm(&mut self, buffer: &'static WaveBuffer, interval: u32) {
        self.playback.interval.store(interval, Ordering::Release);
        self.playback.buffer.lock(|b| b.set(Some(buffer)));
        self.playback.halted.store(false, Ordering::Release);
        self.playback.wake.signal(());
    }

    fn write_level(&mut self, level: u16) {
        self.playback.set_level(level);
    }

    fn halt(&mut self) {
        self.playback.halted.store(true, Ordering::Release);
    }

    fn resume(&mut self) {
        self.playback.halted.store(false, Ordering::Release);
        self.playback.wake.signal(());
    }
}
