/// Busy-waits for a number of iterations of a fixed-length loop.
///
/// Used to pad the pulses inside the bit loop. One iteration must always
/// take the same number of CPU cycles; tell the driver how many through
/// [Config::cycles_per_iteration](crate::Config::cycles_per_iteration).
/// Implementations must not block, yield or otherwise have a latency that
/// depends on anything but `iterations`.
pub trait CycleSpin {
    /// Spins for `iterations` rounds of the loop.
    fn spin(&mut self, iterations: u32);
}

/// Portable padding based on [core::hint::spin_loop].
///
/// Not cycle-accurate. The cost of an iteration is up to the compiler and
/// the core, and on targets where `spin_loop` emits no instruction (AVR,
/// for one) the whole loop may be optimized away. Only use it after
/// measuring the result, and prefer a target-specific implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinLoop;

impl CycleSpin for SpinLoop {
    #[inline(always)]
    fn spin(&mut self, iterations: u32) {
        for _ in 0..iterations {
            core::hint::spin_loop();
        }
    }
}

/// Padding for Cortex-M cores, based on [cortex_m::asm::delay].
///
/// One iteration is one cycle.
#[cfg(feature = "cortex-m")]
#[cfg_attr(docsrs, doc(cfg(feature = "cortex-m")))]
#[derive(Debug, Default, Clone, Copy)]
pub struct CortexMSpin;

#[cfg(feature = "cortex-m")]
impl CycleSpin for CortexMSpin {
    #[inline(always)]
    fn spin(&mut self, iterations: u32) {
        if iterations > 0 {
            cortex_m::asm::delay(iterations);
        }
    }
}

/// Padding for AVR cores, as an inline assembly countdown.
///
/// An iteration is a `subi` and a taken `brcc`, 3 cycles. Leaving the loop
/// costs 2 more cycles, also for zero iterations. The counter is 8 bits wide,
/// larger counts saturate. [Config::ARDUINO_UNO](crate::Config::ARDUINO_UNO)
/// is set up for this loop.
///
/// Inline assembly on AVR needs a nightly compiler.
#[cfg(all(feature = "avr", target_arch = "avr"))]
#[cfg_attr(docsrs, doc(cfg(feature = "avr")))]
#[derive(Debug, Default, Clone, Copy)]
pub struct AvrSpin;

#[cfg(all(feature = "avr", target_arch = "avr"))]
impl CycleSpin for AvrSpin {
    #[inline(always)]
    fn spin(&mut self, iterations: u32) {
        let count = u8::try_from(iterations).unwrap_or(u8::MAX);
        // SAFETY: only touches the counter register and the status flags.
        unsafe {
            core::arch::asm!(
                "2:",
                "subi {count}, 1",
                "brcc 2b",
                count = inout(reg_upper) count => _,
                options(nomem, nostack),
            );
        }
    }
}
