//! Reverse Alert Main Application
//!
//! Entry point for the STM32G474-based reverse proximity alert.
//! Initializes hardware, starts one interrupt executor per priority level
//! and runs status reporting in thread mode.

#![no_std]
#![no_main]

use core::cell::RefCell;

use cortex_m_rt::entry;
use defmt::{debug, info, trace, unwrap, warn};
use embassy_executor::{Executor, InterruptExecutor};
use embassy_stm32::adc::Adc;
use embassy_stm32::dac::DacCh1;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::usart::UartTx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use reverse_alert::hal::adc::{AdcTrigger, ConversionRequest, ProximityAdc};
use reverse_alert::hal::dac::{ToneDac, TonePlayback};
use reverse_alert::hal::gpio::GateSignal;
use reverse_alert::hal::timer::{PeriodicClock, TickSwitch};
use reverse_alert::hal::uart::{status_config, StatusUart};
use reverse_alert::prelude::*;

type Indicators = IndicatorMachine<Output<'static>>;

/// Shared state of the alert pipeline
static CONTEXT: ControlContext = ControlContext::new();

/// Tone buffer bound to playback at boot
static WAVE: WaveBuffer = WaveBuffer::new(WaveformPattern::NEAR);

static TONE: TonePlayback = TonePlayback::new();
static CONVERSION: ConversionRequest = ConversionRequest::new();
static TICK: TickSwitch = TickSwitch::new();

/// Indicator machine, shared by the tick and the enable gate
static INDICATORS: Mutex<CriticalSectionRawMutex, RefCell<Option<Indicators>>> =
    Mutex::new(RefCell::new(None));

static EXECUTOR_GATE: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_TRIGGER: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_CONVERSION: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_TICK: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_THREAD: StaticCell<Executor> = StaticCell::new();

#[interrupt]
unsafe fn UART4() {
    EXECUTOR_GATE.on_interrupt();
}

#[interrupt]
unsafe fn UART5() {
    EXECUTOR_TRIGGER.on_interrupt();
}

#[interrupt]
unsafe fn USART3() {
    EXECUTOR_CONVERSION.on_interrupt();
}

#[interrupt]
unsafe fn SPI3() {
    EXECUTOR_TICK.on_interrupt();
}

/// Main entry point
#[entry]
fn main() -> ! {
    info!("Reverse Alert Firmware v{}", env!("CARGO_PKG_VERSION"));

    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Indicator lamps: near lit, far dark
    let near_led = Output::new(p.PB4, Level::High, Speed::Low);
    let far_led = Output::new(p.PB5, Level::Low, Speed::Low);

    // Tone output, armed before anything else can touch the buffer
    let dac = DacCh1::new(p.DAC1, embassy_stm32::dma::NoDma, p.PA4);
    TONE.install(dac);
    let mut tone = ToneDac::new(&TONE);
    let engine = unwrap!(WaveformEngine::arm(
        &WAVE,
        &mut tone,
        DAC_CLOCK_HZ,
        WAVE_FREQUENCY_HZ
    ));

    let near = unwrap!(BlinkChannel::new(NEAR_HOLD_TICKS));
    let far = unwrap!(BlinkChannel::new(FAR_HOLD_TICKS));
    let machine = match IndicatorMachine::new(near_led, far_led, near, far, engine) {
        Ok(machine) => machine,
        Err(never) => match never {},
    };
    INDICATORS.lock(|cell| cell.replace(Some(machine)));

    let adc = ProximityAdc::new(Adc::new(p.ADC1), p.PA0);
    let switch = GateSignal::new(ExtiInput::new(p.PC13, p.EXTI13, Pull::Down));
    let gate = EnableGate::new(switch, &TICK, tone);

    let tx = unwrap!(UartTx::new_blocking(p.USART2, p.PA2, status_config()));
    let uart = StatusUart::new(tx);

    info!(
        "Pins: switch {} sensor {} near {} far {} tone {} tx {}",
        pins::ENABLE_SWITCH,
        pins::DISTANCE_SENSOR,
        pins::NEAR_LED,
        pins::FAR_LED,
        pins::BUZZER_DAC,
        pins::STATUS_TX
    );

    // Priority ladder, highest first
    interrupt::UART4.set_priority(priority(priorities::ENABLE_GATE));
    let spawner = EXECUTOR_GATE.start(interrupt::UART4);
    unwrap!(spawner.spawn(gate_task(gate)));
    unwrap!(spawner.spawn(playback_task()));

    interrupt::UART5.set_priority(priority(priorities::SAMPLE_TRIGGER));
    let spawner = EXECUTOR_TRIGGER.start(interrupt::UART5);
    unwrap!(spawner.spawn(trigger_task(AdcTrigger::new(&CONVERSION))));

    interrupt::USART3.set_priority(priority(priorities::CONVERSION));
    let spawner = EXECUTOR_CONVERSION.start(interrupt::USART3);
    unwrap!(spawner.spawn(conversion_task(adc)));

    interrupt::SPI3.set_priority(priority(priorities::INDICATOR_TICK));
    let spawner = EXECUTOR_TICK.start(interrupt::SPI3);
    unwrap!(spawner.spawn(tick_task()));

    info!(
        "Executors on {} {} {} {}",
        timers::GATE_VECTOR,
        timers::TRIGGER_VECTOR,
        timers::CONVERSION_VECTOR,
        timers::TICK_VECTOR
    );

    let executor = EXECUTOR_THREAD.init(Executor::new());
    executor.run(|spawner| {
        unwrap!(spawner.spawn(status_task(uart)));
    })
}

fn priority(level: u8) -> Priority {
    match level {
        0 => Priority::P0,
        1 => Priority::P1,
        2 => Priority::P2,
        3 => Priority::P3,
        4 => Priority::P4,
        _ => Priority::P5,
    }
}

/// Enable gate - toggles the master enable on each switch edge
#[embassy_executor::task]
async fn gate_task(mut gate: EnableGate<GateSignal<'static>, &'static TickSwitch, ToneDac>) {
    loop {
        gate.signal_mut().wait_edge().await;
        let result = INDICATORS.lock(|cell| {
            cell.borrow_mut()
                .as_mut()
                .map(|machine| gate.on_edge(&CONTEXT, machine))
        });
        match result {
            Some(Ok(state)) => info!("Switch -> {}", state),
            Some(Err(never)) => match never {},
            None => warn!("gate edge before indicators were ready"),
        }
    }
}

/// Tone playback - streams the armed buffer to the DAC
#[embassy_executor::task]
async fn playback_task() {
    TONE.run().await
}

/// Sample trigger - requests one conversion per sample period
#[embassy_executor::task]
async fn trigger_task(mut trigger: AdcTrigger) {
    let source = SampleSource::default();
    let mut clock = PeriodicClock::from_period_ms(SAMPLE_PERIOD_MS);
    loop {
        clock.next().await;
        source.on_trigger(&mut trigger);
    }
}

/// Conversion - reads, stores and classifies each requested sample
#[embassy_executor::task]
async fn conversion_task(mut adc: ProximityAdc<'static, embassy_stm32::peripherals::PA0>) {
    let source = SampleSource::default();
    loop {
        CONVERSION.wait().await;
        source.on_conversion_complete(&CONTEXT, &mut adc);
    }
}

/// Indicator tick - blinks the active line while enabled
#[embassy_executor::task]
async fn tick_task() {
    let mut clock = PeriodicClock::from_period_ms(TICK_PERIOD_MS);
    loop {
        if !TICK.is_enabled() {
            TICK.wait_enabled().await;
            clock.reset();
        }
        clock.next().await;

        // The enable state is re-read inside the lock, so a gate edge that
        // lands after the wait above still suppresses this tick
        let outcome = INDICATORS.lock(|cell| {
            cell.borrow_mut()
                .as_mut()
                .map(|machine| machine.on_tick(&CONTEXT))
        });
        match outcome {
            Some(Ok(TickOutcome::Toggled {
                line,
                level,
                tone_changed,
            })) => {
                trace!("{} line -> {}", line, level);
                if tone_changed {
                    debug!("Tone -> {}", CONTEXT.mode());
                }
            }
            Some(Ok(_)) | None => {}
            Some(Err(never)) => match never {},
        }
    }
}

/// Status reporting - one line per period, rotating through the reports
#[embassy_executor::task]
async fn status_task(mut uart: StatusUart<'static>) {
    let mut rotation = StatusRotation::new();
    loop {
        let snapshot = CONTEXT.snapshot();
        if let Err(e) = rotation.step(&snapshot, &mut uart) {
            warn!("status line dropped: {}", e);
        }
        Timer::after(Duration::from_millis(u64::from(STATUS_PERIOD_MS))).await;
    }
}
