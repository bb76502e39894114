//! Conversion between caller color values and the controller's native pixel encoding.
//!
//! In 65k color mode with the C->B->A color remap the SSD1351 takes one 16-bit RGB565 word per
//! pixel, sent high byte first.

/// A color value that can be converted to and from the native 16-bit pixel encoding.
pub trait NativeColor: Copy {
    fn to_native(self) -> u16;
    fn from_native(raw: u16) -> Self;
}

/// Raw RGB565 words are already in the native encoding.
impl NativeColor for u16 {
    fn to_native(self) -> u16 {
        self
    }

    fn from_native(raw: u16) -> Self {
        raw
    }
}

/// A color with 8 bits per channel. Converting to the native encoding drops the low bits of each
/// channel; converting back replicates the high bits into them so that full scale stays full
/// scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
}

impl NativeColor for Rgb {
    fn to_native(self) -> u16 {
        let r = u16::from(self.0 >> 3);
        let g = u16::from(self.1 >> 2);
        let b = u16::from(self.2 >> 3);
        r << 11 | g << 5 | b
    }

    fn from_native(raw: u16) -> Self {
        let r = ((raw >> 11) & 0x1F) as u8;
        let g = ((raw >> 5) & 0x3F) as u8;
        let b = (raw & 0x1F) as u8;
        Rgb(r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2)
    }
}
