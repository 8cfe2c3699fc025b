use embedded_hal::digital::PinState;

use crate::port::{PortRegister, ResolvedPin};

/// A platform pin number, e.g. the digital pin number printed on an Arduino board.
pub type PinId = u8;

/// Maps pin identifiers to the hardware that drives them.
///
/// Queried once per frame, before interrupts are suspended.
pub trait PinResolver {
    /// The register type backing the resolved pins.
    type Port: PortRegister;

    /// Resolves `pin` to its output register and bit mask.
    ///
    /// Returns `None` for unknown or unusable pins.
    fn resolve(&mut self, pin: PinId) -> Option<ResolvedPin<Self::Port>>;
}

/// Basic digital output control, addressed by pin identifier.
pub trait PinControl {
    /// The error returned when a pin cannot be configured.
    type Error: core::fmt::Debug;

    /// Configures `pin` as a digital output.
    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Drives `pin` to the given level.
    fn write(&mut self, pin: PinId, state: PinState);
}
