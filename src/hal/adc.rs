//! ADC Driver
//!
//! Distance sensor sampling on ADC1. The trigger side only raises a signal;
//! the conversion itself runs in the conversion executor, which then calls
//! the conversion-complete handler.
//!
//! Conversions are serialized by that executor: one handler runs to
//! completion before the next request is taken. A trigger raised while a
//! handler runs stays latched in the signal, coalesced with any others, and
//! is served right after the handler returns.

use embassy_stm32::adc::{Adc, AdcChannel, SampleTime};
use embassy_stm32::peripherals::ADC1;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::ports::{AnalogInput, ConversionTrigger};
use crate::types::RawSample;

/// Hand-off from the sample trigger to the conversion executor
pub struct ConversionRequest {
    pending: Signal<CriticalSectionRawMutex, ()>,
}

impl ConversionRequest {
    /// Create an idle request line
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Signal::new(),
        }
    }

    /// Wait for the next conversion request
    pub async fn wait(&self) {
        self.pending.wait().await;
    }
}

impl Default for ConversionRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Trigger half, held by the sample-trigger task
#[derive(Clone, Copy)]
pub struct AdcTrigger {
    request: &'static ConversionRequest,
}

impl AdcTrigger {
    /// Create a trigger raising `request`
    #[must_use]
    pub const fn new(request: &'static ConversionRequest) -> Self {
        Self { request }
    }
}

impl ConversionTrigger for AdcTrigger {
    fn trigger_conversion(&mut self) {
        // A request still pending is coalesced with this one
        self.request.pending.signal(());
    }
}

/// Distance sensor on ADC1
pub struct ProximityAdc<'d, C: AdcChannel<ADC1>> {
    adc: Adc<'d, ADC1>,
    channel: C,
}

impl<'d, C: AdcChannel<ADC1>> ProximityAdc<'d, C> {
    /// Create the sensor input
    ///
    /// The sensor output is slow-moving, so the longest sample time is used.
    #[must_use]
    pub fn new(mut adc: Adc<'d, ADC1>, channel: C) -> Self {
        adc.set_sample_time(SampleTime::CYCLES640_5);
        Self { adc, channel }
    }
}

impl<C: AdcChannel<ADC1>> AnalogInput for ProximityAdc<'_, C> {
    fn read_last_conversion(&mut self) -> RawSample {
        RawSample::from_raw(self.adc.blocking_read(&mut self.channel))
    }

    // Completion is delivered by the conversion executor, which cannot
    // re-enter itself, so there is nothing to mask. A request raised in
    // between is served after the handler returns.
    fn mask_completion(&mut self) {}

    fn unmask_completion(&mut self) {}
}
