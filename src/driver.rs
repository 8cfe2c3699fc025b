use embedded_hal::{delay::DelayNs, digital::PinState};

use crate::{
    emitter::emit_bytes,
    errors::{
        InitError, PinConfigurationSnafu, SendError, TooManyPixelsSnafu, UnresolvedPinSnafu,
    },
    interrupts::{CriticalSectionInterrupts, InterruptControl, InterruptsSuspended},
    pins::{PinControl, PinId, PinResolver},
    pixel::{wire_bytes, Pixel},
    spin::CycleSpin,
    timing::{BitTiming, PulseCycles, LATCH_DURATION_US},
    Config, MAX_PIXELS,
};

/// The desired state of an LED strip.
#[derive(Debug, Clone, Copy)]
pub struct StripState<'a> {
    /// The colors of the LEDs, starting with the one closest to the data pin.
    pub pixels: &'a [Pixel],
    /// The data pin of the strip.
    pub pin: PinId,
}

impl<'a> StripState<'a> {
    /// Describes a strip connected to `pin`.
    pub fn new(pixels: &'a [Pixel], pin: PinId) -> Self {
        Self { pixels, pin }
    }
}

/// A bit-banged WS2812B driver
///
/// * `G` - resolves and configures the data pins
/// * `D` - the microsecond delay for the latch
/// * `S` - the cycle padding inside the bit loop
/// * `I` - suspends interrupts during transmission
pub struct Ws2812b<G, D, S, I = CriticalSectionInterrupts> {
    gpio: G,
    delay: D,
    spin: S,
    interrupts: I,
    cycles: PulseCycles,
}

impl<G, D, S> Ws2812b<G, D, S>
where
    G: PinResolver + PinControl,
    D: DelayNs,
    S: CycleSpin,
{
    /// Initializes the driver.
    ///
    /// Interrupts get suspended through the [critical_section] crate;
    /// use [with_interrupt_control](Ws2812b::with_interrupt_control) to change that.
    pub fn init(gpio: G, delay: D, spin: S, config: Config) -> Result<Self, InitError> {
        let cycles = PulseCycles::new(&BitTiming::WS2812B, &config)?;

        log::debug!("Initializing WS2812B driver.");
        log::debug!("    CPU clock: {} Hz", config.cpu_hz);
        log::debug!("    Padding: {} cycles per iteration", config.cycles_per_iteration);
        log::debug!(
            "    Overhead: {} cycles HIGH, {} cycles LOW",
            config.high_overhead_cycles,
            config.low_overhead_cycles
        );
        log::debug!("    Iterations: {:?}", cycles);

        Ok(Self {
            gpio,
            delay,
            spin,
            interrupts: CriticalSectionInterrupts,
            cycles,
        })
    }
}

impl<G, D, S, I> Ws2812b<G, D, S, I>
where
    G: PinResolver + PinControl,
    D: DelayNs,
    S: CycleSpin,
    I: InterruptControl,
{
    /// Replaces the way interrupts are suspended during transmission.
    pub fn with_interrupt_control<I2: InterruptControl>(
        self,
        interrupts: I2,
    ) -> Ws2812b<G, D, S, I2> {
        Ws2812b {
            gpio: self.gpio,
            delay: self.delay,
            spin: self.spin,
            interrupts,
            cycles: self.cycles,
        }
    }

    /// The padding iterations used for each pulse.
    pub fn pulse_cycles(&self) -> PulseCycles {
        self.cycles
    }

    /// Sends one complete frame to an LED strip.
    ///
    /// Blocks until the frame is on the wire and latched, and keeps
    /// interrupts suspended while the bits are going out.
    ///
    /// Nothing is sent if an error is returned.
    pub fn set_strip_state(&mut self, state: &StripState<'_>) -> Result<(), SendError> {
        let pin = state.pin;
        let length = state.pixels.len();

        if length > MAX_PIXELS {
            log::warn!("Frame of {} pixels is too long.", length);
            return TooManyPixelsSnafu { length }.fail();
        }

        let Some(mut resolved) = self.gpio.resolve(pin) else {
            log::warn!("Unable to resolve pin {}.", pin);
            return UnresolvedPinSnafu { pin }.fail();
        };

        if let Err(e) = self.gpio.configure_output(pin) {
            log::warn!("Unable to configure pin {} as output: {:?}", pin, e);
            return PinConfigurationSnafu { pin }.fail();
        }

        log::trace!("Sending {} pixels on pin {}.", length, pin);

        self.gpio.write(pin, PinState::Low);
        self.delay.delay_us(LATCH_DURATION_US);

        {
            let _suspended = InterruptsSuspended::new(&mut self.interrupts);
            emit_bytes(
                wire_bytes(state.pixels),
                &mut resolved,
                &self.cycles,
                &mut self.spin,
            );
        }

        // Latch
        self.gpio.write(pin, PinState::Low);
        self.delay.delay_us(LATCH_DURATION_US);

        Ok(())
    }
}
