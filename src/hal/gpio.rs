//! GPIO Abstractions
//!
//! The enable switch input. Indicator lamps are plain
//! [`embassy_stm32::gpio::Output`] pins, which already implement
//! [`embedded_hal::digital::OutputPin`].

use embassy_stm32::exti::ExtiInput;

use crate::ports::EdgeSignal;

/// Enable switch on an EXTI line, rising edge
pub struct GateSignal<'d> {
    input: ExtiInput<'d>,
}

impl<'d> GateSignal<'d> {
    /// Wrap the EXTI input
    #[must_use]
    pub fn new(input: ExtiInput<'d>) -> Self {
        Self { input }
    }

    /// Wait for the next rising edge
    pub async fn wait_edge(&mut self) {
        self.input.wait_for_rising_edge().await;
    }
}

impl EdgeSignal for GateSignal<'_> {
    fn acknowledge(&mut self) {
        // The EXTI driver clears the pending bit when the edge future
        // completes
    }
}
