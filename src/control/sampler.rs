//! Sample Source
//!
//! Handlers for the two halves of periodic sampling: the trigger timer
//! starts a conversion, and the conversion-complete handler stores the
//! reading and classifies it.
//!
//! At most one conversion is in flight. A slow conversion only eats into the
//! sampling margin; the timer issues a fresh trigger on its own cadence.

use crate::control::classifier::classify_with;
use crate::control::state::ControlContext;
use crate::ports::{AnalogInput, ConversionTrigger};
use crate::types::ProximityMode;

/// Sampling stage of the pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleSource {
    /// Classification threshold in converter units
    threshold: u16,
}

impl SampleSource {
    /// Create a sample source classifying against `threshold`
    #[must_use]
    pub const fn new(threshold: u16) -> Self {
        Self { threshold }
    }

    /// Classification threshold
    #[must_use]
    pub const fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Sample-trigger timer handler
    pub fn on_trigger<T: ConversionTrigger>(&self, trigger: &mut T) {
        trigger.trigger_conversion();
    }

    /// Conversion-complete handler
    ///
    /// Masks its own signal, stores the reading, classifies it and
    /// publishes the mode, then unmasks. The mode is written on every call,
    /// changed or not.
    pub fn on_conversion_complete<A: AnalogInput>(
        &self,
        ctx: &ControlContext,
        adc: &mut A,
    ) -> ProximityMode {
        adc.mask_completion();

        let sample = adc.read_last_conversion();
        ctx.store_sample(sample);

        let mode = classify_with(sample, self.threshold);
        ctx.set_mode(mode);

        adc.unmask_completion();

        trace!("sample {} -> {}", sample, mode);
        mode
    }
}

impl Default for SampleSource {
    fn default() -> Self {
        Self::new(crate::config::PROXIMITY_THRESHOLD)
    }
}
