use snafu::prelude::*;

use crate::{
    errors::{ClockTooSlowSnafu, InitError, OverheadTooLargeSnafu},
    Config,
};

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// A 0-bit must have dropped back to LOW before this many ns.
/// Everything else about the timing is lenient.
pub const ZERO_HIGH_LIMIT_NS: u32 = 500;

/// Minimum LOW time after a frame before the strip latches the data.
pub const LATCH_DURATION_US: u32 = 50;

/// Pulse widths of a single bit, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitTiming {
    /// HIGH time of a 0-bit.
    pub zero_high_ns: u32,
    /// LOW time of a 0-bit.
    pub zero_low_ns: u32,
    /// HIGH time of a 1-bit.
    pub one_high_ns: u32,
    /// LOW time of a 1-bit.
    pub one_low_ns: u32,
}

impl BitTiming {
    /// The WS2812B datasheet values; 1250 ns per bit, 800 kHz.
    pub const WS2812B: Self = Self {
        zero_high_ns: 350,
        zero_low_ns: 900,
        one_high_ns: 900,
        one_low_ns: 350,
    };
}

/// Padding iterations the bit loop spins for, per pulse.
///
/// HIGH pulses are rounded down so a 0-bit never overshoots its limit,
/// LOW pulses are rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseCycles {
    /// Padding of a 0-bit HIGH pulse.
    pub zero_high: u32,
    /// Padding of a 0-bit LOW pulse.
    pub zero_low: u32,
    /// Padding of a 1-bit HIGH pulse.
    pub one_high: u32,
    /// Padding of a 1-bit LOW pulse.
    pub one_low: u32,
}

impl PulseCycles {
    /// Converts `timing` into padding for the clock, iteration length and overheads in `config`.
    ///
    /// Fails if a 0-bit HIGH pulse cannot be kept below [ZERO_HIGH_LIMIT_NS],
    /// or if a 1-bit HIGH pulse cannot be made longer than that.
    pub fn new(timing: &BitTiming, config: &Config) -> Result<Self, InitError> {
        let cpu_hz = config.cpu_hz;
        ensure!(cpu_hz > 0, ClockTooSlowSnafu { cpu_hz });

        let per_iteration = config.cycles_per_iteration.max(1);
        let high_overhead = config.high_overhead_cycles;
        let low_overhead = config.low_overhead_cycles;

        let high_padding = |ns| {
            let cycles = cycles_floor(ns, cpu_hz).saturating_sub(high_overhead);
            cycles / per_iteration
        };
        let low_padding = |ns| {
            let cycles = cycles_ceil(ns, cpu_hz).saturating_sub(low_overhead);
            cycles / per_iteration + u32::from(cycles % per_iteration != 0)
        };
        let high_ns = |iterations: u32| {
            let cycles = iterations.saturating_mul(per_iteration).saturating_add(high_overhead);
            cycles_to_ns(cycles, cpu_hz)
        };

        let zero_high = high_padding(timing.zero_high_ns);
        let one_high = high_padding(timing.one_high_ns);

        let zero_high_ns = high_ns(zero_high);
        ensure!(
            zero_high_ns < ZERO_HIGH_LIMIT_NS,
            OverheadTooLargeSnafu {
                overhead_cycles: high_overhead,
                zero_high_ns,
            }
        );
        ensure!(high_ns(one_high) >= ZERO_HIGH_LIMIT_NS, ClockTooSlowSnafu { cpu_hz });

        Ok(Self {
            zero_high,
            zero_low: low_padding(timing.zero_low_ns),
            one_high,
            one_low: low_padding(timing.one_low_ns),
        })
    }
}

fn cycles_floor(ns: u32, cpu_hz: u32) -> u32 {
    let cycles = u64::from(ns) * u64::from(cpu_hz) / NANOS_PER_SECOND;
    u32::try_from(cycles).unwrap_or(u32::MAX)
}

fn cycles_ceil(ns: u32, cpu_hz: u32) -> u32 {
    let cycles = (u64::from(ns) * u64::from(cpu_hz) + NANOS_PER_SECOND - 1) / NANOS_PER_SECOND;
    u32::try_from(cycles).unwrap_or(u32::MAX)
}

fn cycles_to_ns(cycles: u32, cpu_hz: u32) -> u32 {
    let ns = u64::from(cycles) * NANOS_PER_SECOND / u64::from(cpu_hz);
    u32::try_from(ns).unwrap_or(u32::MAX)
}
