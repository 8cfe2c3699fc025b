//! Pins of the Arduino Uno (ATmega328P).
//!
//! Digital pins 0-7 live on port D, 8-13 on port B and the analog pins
//! A0-A5 (14-19) on port C.

use embedded_hal::digital::PinState;
use paste::paste;
use snafu::prelude::*;

use crate::{
    errors::{UnknownPinSnafu, UnoPinError},
    pins::{PinControl, PinId, PinResolver},
    port::{MmioPort, PortRegister, ResolvedPin},
};

macro_rules! avr_ports {
    ($($letter:ident @ $pin_register:literal),+ $(,)?) => {
        paste! {
            $(
                #[doc = "Input register of port " $letter "."]
                pub const [<PIN $letter>]: usize = $pin_register;
                #[doc = "Data direction register of port " $letter "."]
                pub const [<DDR $letter>]: usize = $pin_register + 1;
                #[doc = "Output register of port " $letter "."]
                pub const [<PORT $letter>]: usize = $pin_register + 2;
            )+
        }
    };
}

// Data space addresses
avr_ports!(B @ 0x23, C @ 0x26, D @ 0x29);

macro_rules! board_pins {
    ($prefix:ident, $first:literal: $($n:literal)+) => {
        paste! {
            $(
                #[doc = "Board pin " $prefix $n "."]
                pub const [<$prefix $n>]: PinId = $first + $n;
            )+
        }
    };
}

board_pins!(D, 0: 0 1 2 3 4 5 6 7 8 9 10 11 12 13);
board_pins!(A, 14: 0 1 2 3 4 5);

/// The registers and bit of a single Uno pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnoPinAddress {
    /// Output register.
    pub port: usize,
    /// Data direction register.
    pub ddr: usize,
    /// Bit offset within both registers.
    pub bit: u8,
}

/// Looks up the registers of an Uno pin.
pub fn pin_address(pin: PinId) -> Option<UnoPinAddress> {
    let (port, ddr, bit) = match pin {
        0..=7 => (PORTD, DDRD, pin),
        8..=13 => (PORTB, DDRB, pin - 8),
        14..=19 => (PORTC, DDRC, pin - 14),
        _ => return None,
    };
    Some(UnoPinAddress { port, ddr, bit })
}

/// Direct register access to the Uno's pins.
#[derive(Debug)]
pub struct UnoGpio {
    _private: (),
}

impl UnoGpio {
    /// Takes control of the Uno's GPIO registers.
    ///
    /// # Safety
    ///
    /// Must only be used on an ATmega328P. Nothing else may modify
    /// the port registers while a frame is being sent.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }

    fn modify(register: usize, mask: u8, state: PinState) {
        // SAFETY: only called with register addresses from `pin_address`,
        // which are valid on the ATmega328P `UnoGpio::new` was promised.
        let mut register = unsafe { MmioPort::<u8>::new(register) };
        let value = register.read();
        register.write(match state {
            PinState::High => value | mask,
            PinState::Low => value & !mask,
        });
    }
}

impl PinResolver for UnoGpio {
    type Port = MmioPort<u8>;

    fn resolve(&mut self, pin: PinId) -> Option<ResolvedPin<Self::Port>> {
        let address = pin_address(pin)?;
        // SAFETY: see `modify`.
        let port = unsafe { MmioPort::new(address.port) };
        ResolvedPin::from_bit(port, address.bit)
    }
}

impl PinControl for UnoGpio {
    type Error = UnoPinError;

    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        let address = pin_address(pin).context(UnknownPinSnafu { pin })?;
        Self::modify(address.ddr, 1 << address.bit, PinState::High);
        Ok(())
    }

    fn write(&mut self, pin: PinId, state: PinState) {
        if let Some(address) = pin_address(pin) {
            Self::modify(address.port, 1 << address.bit, state);
        }
    }
}
