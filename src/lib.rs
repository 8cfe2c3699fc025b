#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(feature = "avr", target_arch = "avr"), feature(asm_experimental_arch))]

mod config;
mod driver;
mod emitter;
mod errors;
mod interrupts;
mod pins;
mod pixel;
mod port;
mod spin;
mod timing;

pub mod uno;

pub use config::Config;
pub use driver::{StripState, Ws2812b};
pub use emitter::emit_bytes;
pub use errors::{InitError, SendError, UnoPinError};
pub use interrupts::{CriticalSectionInterrupts, InterruptControl};
pub use pins::{PinControl, PinId, PinResolver};
pub use pixel::{wire_bytes, Pixel};
pub use port::{MmioPort, PortRegister, PortWord, ResolvedPin};
pub use spin::{CycleSpin, SpinLoop};
pub use timing::{BitTiming, PulseCycles, LATCH_DURATION_US, ZERO_HIGH_LIMIT_NS};

#[cfg(feature = "cortex-m")]
pub use spin::CortexMSpin;

#[cfg(all(feature = "avr", target_arch = "avr"))]
pub use spin::AvrSpin;

/// The longest frame that can be sent, in pixels.
///
/// The byte count of a frame has to fit into 16 bits.
pub const MAX_PIXELS: usize = u16::MAX as usize / core::mem::size_of::<Pixel>();
