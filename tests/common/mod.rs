//! A simulated board for driving the WS2812B driver on the host.
//!
//! All collaborators share one [Bus], which holds a virtual clock and
//! an event log. Only padding and delays advance the clock.

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::{cell::RefCell, rc::Rc};

use embedded_hal::{delay::DelayNs, digital::PinState};
use ws2812b_bitbang::{
    Config, CycleSpin, InterruptControl, PinControl, PinId, PinResolver, PortRegister,
    ResolvedPin, Ws2812b,
};

pub const CPU_HZ: u32 = 16_000_000;
pub const PS_PER_CYCLE: u64 = 1_000_000_000_000 / CPU_HZ as u64;

pub const PIN: PinId = 6;
pub const PIN_MASK: u8 = 1 << 6;
pub const UNRESOLVABLE_PIN: PinId = 99;
pub const BROKEN_PIN: PinId = 7;

/// HIGH pulses at or above this length count as a 1-bit.
pub const LONG_PULSE_PS: u64 = 500_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A write to the port register, i.e. by the bit loop.
    PortWrite { at_ps: u64, value: u8 },
    ConfigureOutput { pin: PinId },
    PinWrite { pin: PinId, high: bool },
    Delay { ns: u32 },
    Suspend,
    Resume,
}

#[derive(Debug, Default)]
pub struct Bus {
    pub now_ps: u64,
    pub port: u8,
    pub events: Vec<Event>,
}

pub type SharedBus = Rc<RefCell<Bus>>;

pub fn bus() -> SharedBus {
    Rc::new(RefCell::new(Bus::default()))
}

pub struct SimPort {
    bus: SharedBus,
}

impl PortRegister for SimPort {
    type Word = u8;

    fn read(&mut self) -> u8 {
        self.bus.borrow().port
    }

    fn write(&mut self, value: u8) {
        let mut bus = self.bus.borrow_mut();
        bus.port = value;
        let at_ps = bus.now_ps;
        bus.events.push(Event::PortWrite { at_ps, value });
    }
}

pub struct SimGpio {
    bus: SharedBus,
}

#[derive(Debug)]
pub struct BrokenPin;

impl PinResolver for SimGpio {
    type Port = SimPort;

    fn resolve(&mut self, pin: PinId) -> Option<ResolvedPin<SimPort>> {
        let bit = match pin {
            PIN => 6,
            BROKEN_PIN => 7,
            _ => return None,
        };
        ResolvedPin::from_bit(
            SimPort {
                bus: self.bus.clone(),
            },
            bit,
        )
    }
}

impl PinControl for SimGpio {
    type Error = BrokenPin;

    fn configure_output(&mut self, pin: PinId) -> Result<(), BrokenPin> {
        if pin == BROKEN_PIN {
            return Err(BrokenPin);
        }
        self.bus
            .borrow_mut()
            .events
            .push(Event::ConfigureOutput { pin });
        Ok(())
    }

    fn write(&mut self, pin: PinId, state: PinState) {
        let mut bus = self.bus.borrow_mut();
        let high = state == PinState::High;
        if high {
            bus.port |= PIN_MASK;
        } else {
            bus.port &= !PIN_MASK;
        }
        bus.events.push(Event::PinWrite { pin, high });
    }
}

pub struct SimDelay {
    bus: SharedBus,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        let mut bus = self.bus.borrow_mut();
        bus.now_ps += u64::from(ns) * 1_000;
        bus.events.push(Event::Delay { ns });
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ns(us * 1_000);
    }
}

pub struct SimSpin {
    bus: SharedBus,
}

impl CycleSpin for SimSpin {
    fn spin(&mut self, cycles: u32) {
        self.bus.borrow_mut().now_ps += u64::from(cycles) * PS_PER_CYCLE;
    }
}

/// Padding that also charges the loop overhead of a [Config].
///
/// The bit loop pads twice per bit, HIGH pulse first, so the calls
/// alternate between the two overheads.
pub struct SimLoopSpin {
    bus: SharedBus,
    config: Config,
    high: bool,
}

impl CycleSpin for SimLoopSpin {
    fn spin(&mut self, iterations: u32) {
        let overhead = if self.high {
            self.config.high_overhead_cycles
        } else {
            self.config.low_overhead_cycles
        };
        self.high = !self.high;

        let cycles = overhead + iterations * self.config.cycles_per_iteration;
        self.bus.borrow_mut().now_ps += u64::from(cycles) * PS_PER_CYCLE;
    }
}

pub struct SimInterrupts {
    bus: SharedBus,
}

impl InterruptControl for SimInterrupts {
    type State = ();

    fn suspend_all(&mut self) {
        self.bus.borrow_mut().events.push(Event::Suspend);
    }

    fn resume_all(&mut self, _state: ()) {
        self.bus.borrow_mut().events.push(Event::Resume);
    }
}

pub type SimDriver = Ws2812b<SimGpio, SimDelay, SimSpin, SimInterrupts>;

pub fn sim_gpio(bus: &SharedBus) -> SimGpio {
    SimGpio { bus: bus.clone() }
}

pub fn sim_port(bus: &SharedBus) -> SimPort {
    SimPort { bus: bus.clone() }
}

pub fn sim_spin(bus: &SharedBus) -> SimSpin {
    SimSpin { bus: bus.clone() }
}

pub fn sim_loop_spin(bus: &SharedBus, config: Config) -> SimLoopSpin {
    assert_eq!(config.cpu_hz, CPU_HZ);
    SimLoopSpin {
        bus: bus.clone(),
        config,
        high: true,
    }
}

pub fn sim_interrupts(bus: &SharedBus) -> SimInterrupts {
    SimInterrupts { bus: bus.clone() }
}

pub fn sim_delay(bus: &SharedBus) -> SimDelay {
    SimDelay { bus: bus.clone() }
}

/// A driver wired to the simulated board, with no loop overhead.
pub fn driver(bus: &SharedBus) -> SimDriver {
    Ws2812b::init(
        sim_gpio(bus),
        sim_delay(bus),
        sim_spin(bus),
        Config::new(CPU_HZ),
    )
    .unwrap()
    .with_interrupt_control(sim_interrupts(bus))
}

/// Timestamps and levels of all port writes.
pub fn port_writes(bus: &Bus) -> Vec<(u64, bool)> {
    bus.events
        .iter()
        .filter_map(|event| match *event {
            Event::PortWrite { at_ps, value } => Some((at_ps, value & PIN_MASK != 0)),
            _ => None,
        })
        .collect()
}

/// Durations of all HIGH pulses the bit loop produced, in ps.
pub fn high_pulses(bus: &Bus) -> Vec<u64> {
    let mut pulses = Vec::new();
    let mut rise = None;
    for (at_ps, high) in port_writes(bus) {
        match (high, rise) {
            (true, None) => rise = Some(at_ps),
            (false, Some(start)) => {
                pulses.push(at_ps - start);
                rise = None;
            }
            _ => panic!("Pin written to the same level twice at {} ps", at_ps),
        }
    }
    assert!(rise.is_none(), "Pin left HIGH");
    pulses
}

/// The bits encoded by the HIGH pulses on the port.
pub fn decoded_bits(bus: &Bus) -> Vec<bool> {
    high_pulses(bus)
        .into_iter()
        .map(|pulse| pulse >= LONG_PULSE_PS)
        .collect()
}

/// The bytes encoded by the HIGH pulses on the port, MSB first.
pub fn decoded_bytes(bus: &Bus) -> Vec<u8> {
    let bits = decoded_bits(bus);
    assert_eq!(bits.len() % 8, 0, "Incomplete byte on the wire");
    bits.chunks(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .collect()
}

/// All events except the port writes of the bit loop.
pub fn control_events(bus: &Bus) -> Vec<Event> {
    bus.events
        .iter()
        .copied()
        .filter(|event| !matches!(event, Event::PortWrite { .. }))
        .collect()
}
