use core::{
    fmt::Debug,
    ops::{BitOr, BitXor},
};

/// The register width of a GPIO output port.
pub trait PortWord: Copy + Eq + Debug + BitOr<Output = Self> + BitXor<Output = Self> {
    /// A word with only the given bit set, or `None` if the bit is out of range.
    fn bit(offset: u8) -> Option<Self>;
}

macro_rules! impl_port_word {
    ($($t:ty)+) => {
        $(
            impl PortWord for $t {
                fn bit(offset: u8) -> Option<Self> {
                    (1 as $t).checked_shl(u32::from(offset))
                }
            }
        )+
    };
}

impl_port_word!(u8 u16 u32);

/// A GPIO output register, written as a whole word.
///
/// Implementations must have a fixed, short latency for both operations;
/// they are called from inside the timed bit loop.
pub trait PortRegister {
    /// The width of the register.
    type Word: PortWord;

    /// Reads the current output levels of the port.
    fn read(&mut self) -> Self::Word;

    /// Sets the output levels of the port.
    fn write(&mut self, value: Self::Word);
}

/// A memory-mapped output register, accessed with volatile reads and writes.
#[derive(Debug)]
pub struct MmioPort<W> {
    register: *mut W,
}

impl<W: PortWord> MmioPort<W> {
    /// Wraps the register at the given address.
    ///
    /// # Safety
    ///
    /// `address` must be a valid, aligned output register of width `W`
    /// that may be read and written for as long as this object lives.
    pub unsafe fn new(address: usize) -> Self {
        Self {
            register: address as *mut W,
        }
    }

    /// The address of the wrapped register.
    pub fn address(&self) -> usize {
        self.register as usize
    }
}

impl<W: PortWord> PortRegister for MmioPort<W> {
    type Word = W;

    #[inline(always)]
    fn read(&mut self) -> W {
        // SAFETY: validity of the register is a precondition of `MmioPort::new`.
        unsafe { core::ptr::read_volatile(self.register) }
    }

    #[inline(always)]
    fn write(&mut self, value: W) {
        // SAFETY: validity of the register is a precondition of `MmioPort::new`.
        unsafe { core::ptr::write_volatile(self.register, value) }
    }
}

/// An output pin resolved to its port register and bit mask.
///
/// Computed once per frame, before interrupts are suspended, and
/// constant for the whole transmission.
#[derive(Debug)]
pub struct ResolvedPin<P: PortRegister> {
    pub(crate) port: P,
    pub(crate) mask: P::Word,
}

impl<P: PortRegister> ResolvedPin<P> {
    /// Combines a port register with the mask of the pin's bit.
    pub fn new(port: P, mask: P::Word) -> Self {
        Self { port, mask }
    }

    /// Combines a port register with the pin's bit offset.
    ///
    /// Returns `None` if the offset does not fit into the register.
    pub fn from_bit(port: P, offset: u8) -> Option<Self> {
        P::Word::bit(offset).map(|mask| Self::new(port, mask))
    }

    /// The bit mask of the pin within its port.
    pub fn mask(&self) -> P::Word {
        self.mask
    }
}
