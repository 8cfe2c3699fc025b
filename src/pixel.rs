use bytemuck::{Pod, Zeroable};

/// A single LED of the strip.
///
/// IMPORTANT: The field order is the order the WS2812B expects on the wire,
/// which is Green-Red-Blue. The bytes are sent exactly as they are laid out
/// in memory; no reordering takes place during transmission.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Pixel {
    /// Green channel, sent first.
    pub green: u8,
    /// Red channel, sent second.
    pub red: u8,
    /// Blue channel, sent last.
    pub blue: u8,
}

impl Pixel {
    /// A pixel that is switched off.
    pub const OFF: Self = Self {
        green: 0,
        red: 0,
        blue: 0,
    };

    /// The three bytes of this pixel, in wire order.
    pub const fn to_wire_bytes(self) -> [u8; 3] {
        [self.green, self.red, self.blue]
    }
}

/// Raw bytes, already in wire order (G, R, B).
impl From<[u8; 3]> for Pixel {
    fn from([green, red, blue]: [u8; 3]) -> Self {
        Self { green, red, blue }
    }
}

/// 8-bit Linear sRGB, which is the color space
/// most NeoPixel strips are in.
///
/// Be aware that this differs from normal,
/// gamma-corrected sRGB. A conversion has to take place.
///
/// More info can be found in the documentation of the
/// [palette] crate.
impl From<palette::LinSrgb<u8>> for Pixel {
    fn from(color: palette::LinSrgb<u8>) -> Self {
        Self {
            green: color.green,
            red: color.red,
            blue: color.blue,
        }
    }
}

/// Reinterprets a pixel slice as the flat byte sequence that goes on the wire.
///
/// The result is `pixels.len() * 3` bytes long and borrows the pixel memory.
pub fn wire_bytes(pixels: &[Pixel]) -> &[u8] {
    bytemuck::cast_slice(pixels)
}
