/// Describes how fast the bit loop runs on the target.
///
/// The WS2812B timing itself is fixed; this only tells the driver how many
/// CPU cycles the pulses take, how long one padding iteration of the
/// [CycleSpin](crate::CycleSpin) is and how many cycles the loop spends on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// CPU clock in Hz.
    pub cpu_hz: u32,
    /// Cycles one padding iteration takes. Zero is treated as one.
    pub cycles_per_iteration: u32,
    /// Cycles of a HIGH pulse that are not padding: the port store, the bit
    /// test and whatever the padding costs for zero iterations.
    pub high_overhead_cycles: u32,
    /// Cycles of a LOW pulse that are not padding, up to the next HIGH edge.
    pub low_overhead_cycles: u32,
}

impl Config {
    /// An ATmega328P at 16 MHz, padded with `AvrSpin` (feature `avr`).
    ///
    /// An `AvrSpin` iteration is 3 cycles and exits after 2 more. On top
    /// of that, a HIGH pulse spends 4 cycles on the bit test, loading the
    /// count and the `eor`/`st` that ends it; a LOW pulse spends 6 on the bit
    /// and byte counters, the next byte load and the `or`/`st` of the next bit.
    /// This gives 375 ns and 750 ns HIGH pulses. Verify with a logic analyzer
    /// after changing the compiler or its settings.
    pub const ARDUINO_UNO: Self = Self::new(16_000_000)
        .with_cycles_per_iteration(3)
        .with_high_overhead_cycles(2 + 4)
        .with_low_overhead_cycles(2 + 6);

    /// A configuration with one cycle per iteration and without any loop overhead.
    pub const fn new(cpu_hz: u32) -> Self {
        Self {
            cpu_hz,
            cycles_per_iteration: 1,
            high_overhead_cycles: 0,
            low_overhead_cycles: 0,
        }
    }

    /// Sets [cycles_per_iteration](Config::cycles_per_iteration).
    pub const fn with_cycles_per_iteration(mut self, cycles: u32) -> Self {
        self.cycles_per_iteration = cycles;
        self
    }

    /// Sets [high_overhead_cycles](Config::high_overhead_cycles).
    pub const fn with_high_overhead_cycles(mut self, cycles: u32) -> Self {
        self.high_overhead_cycles = cycles;
        self
    }

    /// Sets [low_overhead_cycles](Config::low_overhead_cycles).
    pub const fn with_low_overhead_cycles(mut self, cycles: u32) -> Self {
        self.low_overhead_cycles = cycles;
        self
    }
}
