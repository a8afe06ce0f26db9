//! Enable Gate
//!
//! An edge on the enable switch toggles the master [`EnableState`]. This
//! handler runs above every other interrupt so the alert can always be
//! silenced on demand.
//!
//! - Enabled -> Disabled: withhold the indicator tick, drive both lines off,
//!   and force the tone output to zero.
//! - Disabled -> Enabled: deliver the indicator tick again. Blinking resumes
//!   from the countdowns it stopped at.

use embedded_hal::digital::OutputPin;

use crate::control::state::ControlContext;
use crate::output::indicator::IndicatorMachine;
use crate::output::waveform::WaveformEngine;
use crate::ports::{EdgeSignal, TickControl, WaveformOutput};
use crate::types::EnableState;

/// Enable switch handler and the outputs it overrides
pub struct EnableGate<S, T, O> {
    signal: S,
    tick: T,
    tone: O,
}

impl<S, T, O> EnableGate<S, T, O>
where
    S: EdgeSignal,
    T: TickControl,
    O: WaveformOutput,
{
    /// Create the gate from the edge input, the tick switch and the armed
    /// tone output
    #[must_use]
    pub const fn new(signal: S, tick: T, tone: O) -> Self {
        Self { signal, tick, tone }
    }

    /// Edge handler
    ///
    /// Publishes the new state before touching outputs, so a tick that is
    /// preempted and resumes afterwards sees the system disabled. The caller
    /// holds the indicator lock and logs the returned state after releasing
    /// it.
    ///
    /// # Errors
    ///
    /// Returns the pin error if an indicator line cannot be driven. The
    /// state change and the tone silencing have already happened by then.
    pub fn on_edge<P: OutputPin>(
        &mut self,
        ctx: &ControlContext,
        indicators: &mut IndicatorMachine<P>,
    ) -> Result<EnableState, P::Error> {
        self.signal.acknowledge();
        ctx.record_gate_edge();

        let next = ctx.enable_state().toggle();
        ctx.set_enable_state(next);

        match next {
            EnableState::Disabled => {
                self.tick.disable_tick();
                WaveformEngine::silence(&mut self.tone);
                indicators.force_off()?;
            }
            EnableState::Enabled => {
                WaveformEngine::restart(&mut self.tone);
                self.tick.enable_tick();
            }
        }

        Ok(next)
    }

    /// The edge input
    #[must_use]
    pub const fn signal(&self) -> &S {
        &self.signal
    }

    /// The edge input, for waiting on the next edge
    pub fn signal_mut(&mut self) -> &mut S {
        &mut self.signal
    }

    /// The tick switch
    #[must_use]
    pub const fn tick(&self) -> &T {
        &self.tick
    }

    /// The tone output
    #[must_use]
    pub const fn tone(&self) -> &O {
        &self.tone
    }
}
