use snafu::prelude::*;

use crate::pins::PinId;

/// Errors of the [Ws2812b::init](crate::Ws2812b::init) function
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum InitError {
    /// The CPU clock is too slow to tell a 0-bit from a 1-bit by its HIGH pulse.
    #[snafu(display("a {cpu_hz} Hz clock cannot produce distinguishable WS2812B pulses"))]
    ClockTooSlow {
        /// The configured CPU clock.
        cpu_hz: u32,
    },
    /// The bit loop overhead alone stretches a 0-bit HIGH pulse past its 500 ns limit.
    #[snafu(display(
        "{overhead_cycles} overhead cycles make a 0-bit HIGH pulse {zero_high_ns} ns long"
    ))]
    OverheadTooLarge {
        /// The configured HIGH overhead.
        overhead_cycles: u32,
        /// The resulting 0-bit HIGH duration.
        zero_high_ns: u32,
    },
}

/// Errors of the [Ws2812b::set_strip_state](crate::Ws2812b::set_strip_state) function
///
/// All of them are raised before the first bit goes out on the wire.
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum SendError {
    /// The frame does not fit into a 16-bit byte count.
    #[snafu(display("{length} pixels exceed the maximum of {}", crate::MAX_PIXELS))]
    TooManyPixels {
        /// The number of pixels requested.
        length: usize,
    },
    /// The pin identifier does not map to a port register.
    #[snafu(display("pin {pin} cannot be resolved to a port register"))]
    UnresolvedPin {
        /// The offending pin.
        pin: PinId,
    },
    /// The pin could not be configured as a digital output.
    #[snafu(display("pin {pin} cannot be configured as output"))]
    PinConfiguration {
        /// The offending pin.
        pin: PinId,
    },
}

/// Errors of the [UnoGpio](crate::uno::UnoGpio) pin control
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum UnoPinError {
    /// The Arduino Uno has no pin with this number.
    #[snafu(display("the Arduino Uno has no pin {pin}"))]
    UnknownPin {
        /// The offending pin.
        pin: PinId,
    },
}
