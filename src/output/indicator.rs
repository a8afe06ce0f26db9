//! Indicator State Machine
//!
//! Blinks one of two indicator lines on a fixed tick. The current
//! [`ProximityMode`] picks the active line; the other one is driven off on
//! every tick, which keeps the two mutually exclusive without a separate
//! state for it.
//!
//! Each line has its own countdown. When the active line's countdown
//! reaches zero the line toggles, the countdown reloads, and the tone buffer
//! is refreshed for the current mode.

use embedded_hal::digital::OutputPin;

use crate::config::TOGGLE_COUNTER_MAX;
use crate::control::state::ControlContext;
use crate::output::waveform::WaveformEngine;
use crate::types::{IndicatorLine, LineLevel, ProximityMode};

/// Countdown and level of one indicator line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlinkChannel {
    /// Ticks per half-period
    hold: u16,
    /// Ticks left before the next toggle
    remaining: u16,
    /// Level last driven onto the line
    level: LineLevel,
}

impl BlinkChannel {
    /// Create a channel holding each level for `hold` ticks, starting off
    ///
    /// Returns `None` if `hold` is zero.
    #[must_use]
    pub const fn new(hold: u16) -> Option<Self> {
        if hold == 0 {
            return None;
        }
        Some(Self {
            hold,
            remaining: hold,
            level: LineLevel::Off,
        })
    }

    /// Count one tick; returns true if the level toggled
    pub fn advance(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.level = self.level.toggle();
            self.remaining = self.hold;
            true
        } else {
            false
        }
    }

    /// Ticks per half-period
    #[must_use]
    pub const fn hold(&self) -> u16 {
        self.hold
    }

    /// Ticks left before the next toggle
    #[must_use]
    pub const fn remaining(&self) -> u16 {
        self.remaining
    }

    /// Current level
    #[must_use]
    pub const fn level(&self) -> LineLevel {
        self.level
    }

    fn force(&mut self, level: LineLevel) {
        self.level = level;
    }
}

/// What a tick did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// System disabled; nothing ran
    Suspended,
    /// Active line counted down without toggling
    Held {
        /// Line that counted
        line: IndicatorLine,
    },
    /// Active line toggled and the tone buffer was refreshed
    Toggled {
        /// Line that toggled
        line: IndicatorLine,
        /// Its new level
        level: LineLevel,
        /// Refresh switched the buffer to the other pattern
        tone_changed: bool,
    },
}

/// Two-line blink controller
///
/// Owns the indicator pins and the tone engine, since a toggle refreshes
/// the tone buffer.
pub struct IndicatorMachine<P: OutputPin> {
    near_pin: P,
    far_pin: P,
    near: BlinkChannel,
    far: BlinkChannel,
    /// Free-running count of toggles, wraps at zero
    toggles: u8,
    toggles_max: u8,
    waveform: WaveformEngine,
}

impl<P: OutputPin> IndicatorMachine<P> {
    /// Create the machine in its initial state
    ///
    /// The near line is selected and lit, the far line is off, and both
    /// countdowns are at their maximum. The channels' own levels are
    /// replaced by these.
    ///
    /// # Errors
    ///
    /// Returns the pin error if either line cannot be driven.
    pub fn new(
        mut near_pin: P,
        mut far_pin: P,
        mut near: BlinkChannel,
        mut far: BlinkChannel,
        waveform: WaveformEngine,
    ) -> Result<Self, P::Error> {
        near.force(LineLevel::On);
        far.force(LineLevel::Off);
        near_pin.set_high()?;
        far_pin.set_low()?;

        Ok(Self {
            near_pin,
            far_pin,
            near,
            far,
            toggles: TOGGLE_COUNTER_MAX.max(1),
            toggles_max: TOGGLE_COUNTER_MAX.max(1),
            waveform,
        })
    }

    /// Periodic tick handler
    ///
    /// Does nothing while the system is disabled; otherwise advances the
    /// line selected by the current mode.
    ///
    /// # Errors
    ///
    /// Returns the pin error if a line cannot be driven.
    pub fn on_tick(&mut self, ctx: &ControlContext) -> Result<TickOutcome, P::Error> {
        if !ctx.is_enabled() {
            return Ok(TickOutcome::Suspended);
        }
        self.tick(ctx.mode())
    }

    /// Advance the line selected by `mode` by one tick
    ///
    /// Runs under the lock shared with the enable gate, so it does not log;
    /// the outcome says what happened.
    ///
    /// # Errors
    ///
    /// Returns the pin error if a line cannot be driven.
    pub fn tick(&mut self, mode: ProximityMode) -> Result<TickOutcome, P::Error> {
        let line = mode.indicator();
        self.drive(line.other(), LineLevel::Off)?;

        if !self.channel_mut(line).advance() {
            return Ok(TickOutcome::Held { line });
        }

        let level = self.channel(line).level();
        self.drive(line, level)?;
        let tone_changed = self.waveform.update(mode);

        self.toggles = self.toggles.saturating_sub(1);
        if self.toggles == 0 {
            self.toggles = self.toggles_max;
        }

        Ok(TickOutcome::Toggled {
            line,
            level,
            tone_changed,
        })
    }

    /// Drive both lines off
    ///
    /// Countdowns are left where they are so blinking resumes from the same
    /// point.
    ///
    /// # Errors
    ///
    /// Returns the pin error if a line cannot be driven.
    pub fn force_off(&mut self) -> Result<(), P::Error> {
        self.drive(IndicatorLine::Near, LineLevel::Off)?;
        self.drive(IndicatorLine::Far, LineLevel::Off)
    }

    /// Blink state of a line
    #[must_use]
    pub const fn channel(&self, line: IndicatorLine) -> &BlinkChannel {
        match line {
            IndicatorLine::Near => &self.near,
            IndicatorLine::Far => &self.far,
        }
    }

    /// Level last driven onto a line
    #[must_use]
    pub const fn level(&self, line: IndicatorLine) -> LineLevel {
        self.channel(line).level()
    }

    /// Auxiliary toggle counter
    #[must_use]
    pub const fn toggle_counter(&self) -> u8 {
        self.toggles
    }

    /// The tone engine
    #[must_use]
    pub const fn waveform(&self) -> &WaveformEngine {
        &self.waveform
    }

    /// Pin driving a line
    #[must_use]
    pub fn pin(&self, line: IndicatorLine) -> &P {
        match line {
            IndicatorLine::Near => &self.near_pin,
            IndicatorLine::Far => &self.far_pin,
        }
    }

    fn channel_mut(&mut self, line: IndicatorLine) -> &mut BlinkChannel {
        match line {
            IndicatorLine::Near => &mut self.near,
            IndicatorLine::Far => &mut self.far,
        }
    }

    fn drive(&mut self, line: IndicatorLine, level: LineLevel) -> Result<(), P::Error> {
        let pin = match line {
            IndicatorLine::Near => &mut self.near_pin,
            IndicatorLine::Far => &mut self.far_pin,
        };
        match level {
            LineLevel::On => pin.set_high()?,
            LineLevel::Off => pin.set_low()?,
        }
        self.channel_mut(line).force(level);
        Ok(())
    }
}
