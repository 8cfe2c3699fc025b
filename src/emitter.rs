use crate::{
    port::{PortRegister, ResolvedPin},
    spin::CycleSpin,
    timing::PulseCycles,
};

/// Emits `data` on the resolved pin at 800 kBit/s.
///
/// Every byte is sent as 8 bits, highest bit first. A bit starts with a HIGH
/// edge; the HIGH pulse is long for a 1 and short for a 0, the rest of the
/// bit period is LOW.
///
/// The caller is responsible for suspending interrupts, and for the latch
/// delay after the frame. An empty `data` leaves the pin untouched.
///
/// The port is read once; all further writes are derived from that value,
/// so other pins of the same port must not change during transmission.
#[inline(never)]
pub fn emit_bytes<P, S>(data: &[u8], pin: &mut ResolvedPin<P>, cycles: &PulseCycles, spin: &mut S)
where
    P: PortRegister,
    S: CycleSpin,
{
    if data.is_empty() {
        return;
    }

    let mask = pin.mask;
    let port = &mut pin.port;
    let mut value = port.read();

    for &byte in data {
        let mut byte = byte;
        for _ in 0..8 {
            value = value | mask;
            port.write(value);

            let bit = (byte & 0x80) != 0;
            byte <<= 1;

            // The LOW tails absorb whatever the loop itself costs;
            // the 0-bit HIGH pulse must not.
            if bit {
                spin.spin(cycles.one_high);
                value = value ^ mask;
                port.write(value);
                spin.spin(cycles.one_low);
            } else {
                spin.spin(cycles.zero_high);
                value = value ^ mask;
                port.write(value);
                spin.spin(cycles.zero_low);
            }
        }
    }
}
