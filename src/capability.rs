//! Traits describing what a display driver can do in hardware, so that drawing code can be
//! written once against any driver and ask only for the operations it needs.
//!
//! `Display` implements all of them. Its stream reads fail with `Error::NotSupported`.

use crate::board::Board;
use crate::color::NativeColor;
use crate::display::control::ControlRequest;
use crate::display::region::{Area, WriteStream};
use crate::display::{Display, DisplayState};
use crate::error::Error;
use crate::interface::DisplayInterface;

/// The state every driver keeps about its panel.
pub trait DisplayDriver {
    type Error;

    fn state(&self) -> &DisplayState;
}

/// Clearing the whole display to one color.
pub trait HardwareClear<C>: DisplayDriver {
    fn clear(&mut self, color: C) -> Result<(), Self::Error>;
}

/// Filling a rectangle with one color.
pub trait HardwareFill<C>: DisplayDriver {
    fn fill_area(&mut self, area: Area, color: C) -> Result<(), Self::Error>;
}

/// The receiving end of a streamed write.
pub trait PixelSink<C> {
    type Error;

    fn write_color(&mut self, color: C) -> Result<(), Self::Error>;
    fn write_stop(self) -> Result<(), Self::Error>;
}

/// Streaming pixels into a rectangle.
pub trait HardwareStreamWrite<C>: DisplayDriver {
    type Stream<'s>: PixelSink<C, Error = Self::Error>
    where
        Self: 's;

    fn write_start(&mut self, area: Area) -> Result<Self::Stream<'_>, Self::Error>;
}

/// Reading pixels back out of a rectangle.
pub trait HardwareStreamRead<C>: DisplayDriver {
    fn read_area(&mut self, area: Area, out: &mut [C]) -> Result<(), Self::Error>;
}

/// Raw control requests.
pub trait HardwareControl: DisplayDriver {
    fn control(&mut self, request: ControlRequest, value: u16) -> Result<u16, Self::Error>;
}

impl<DI, B> DisplayDriver for Display<DI, B>
where
    DI: DisplayInterface,
    B: Board,
{
    type Error = Error<DI::Error>;

    fn state(&self) -> &DisplayState {
        Display::state(self)
    }
}

impl<DI, B, C> HardwareClear<C> for Display<DI, B>
where
    DI: DisplayInterface,
    B: Board,
    C: NativeColor,
{
    fn clear(&mut self, color: C) -> Result<(), Self::Error> {
        Display::clear(self, color)
    }
}

impl<DI, B, C> HardwareFill<C> for Display<DI, B>
where
    DI: DisplayInterface,
    B: Board,
    C: NativeColor,
{
    fn fill_area(&mut self, area: Area, color: C) -> Result<(), Self::Error> {
        Display::fill_area(self, area, color)
    }
}

impl<'di, DI, C> PixelSink<C> for WriteStream<'di, DI>
where
    DI: DisplayInterface,
    C: NativeColor,
{
    type Error = Error<DI::Error>;

    fn write_color(&mut self, color: C) -> Result<(), Self::Error> {
        WriteStream::write_color(self, color)
    }

    fn write_stop(self) -> Result<(), Self::Error> {
        self.stop()
    }
}

impl<DI, B, C> HardwareStreamWrite<C> for Display<DI, B>
where
    DI: DisplayInterface,
    B: Board,
    C: NativeColor,
{
    type Stream<'s> = WriteStream<'s, DI> where Self: 's;

    fn write_start(&mut self, area: Area) -> Result<Self::Stream<'_>, Self::Error> {
        Display::write_start(self, area)
    }
}

impl<DI, B, C> HardwareStreamRead<C> for Display<DI, B>
where
    DI: DisplayInterface,
    B: Board,
    C: NativeColor,
{
    fn read_area(&mut self, area: Area, out: &mut [C]) -> Result<(), Self::Error> {
        Display::read_area(self, area, out)
    }
}

impl<DI, B> HardwareControl for Display<DI, B>
where
    DI: DisplayInterface,
    B: Board,
{
    fn control(&mut self, request: ControlRequest, value: u16) -> Result<u16, Self::Error> {
        Display::control(self, request, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::display::testing::init_display;
    use crate::display::DisplaySize;
    use crate::interface::test_spy::Sent;

    /// Draw a one pixel frame around the edge of the display.
    fn frame<D>(disp: &mut D, color: Rgb) -> Result<(), D::Error>
    where
        D: HardwareFill<Rgb>,
    {
        let DisplayState { width, height, .. } = *disp.state();
        disp.fill_area(Area::new(0, 0, width, 1), color)?;
        disp.fill_area(Area::new(0, height - 1, width, 1), color)?;
        disp.fill_area(Area::new(0, 0, 1, height), color)?;
        disp.fill_area(Area::new(width - 1, 0, 1, height), color)
    }

    fn stream_diagonal<D>(disp: &mut D) -> Result<(), D::Error>
    where
        D: HardwareStreamWrite<u16>,
    {
        let mut stream = disp.write_start(Area::new(0, 0, 2, 2))?;
        for pixel in [0xFFFF, 0, 0, 0xFFFF] {
            stream.write_color(pixel)?;
        }
        stream.write_stop()
    }

    #[test]
    fn generic_fill() {
        let (mut disp, di, _) = init_display(DisplaySize::Display128x96);
        frame(&mut disp, Rgb::WHITE).unwrap();
        let sent = di.sent();
        assert_eq!(sent.iter().filter(|s| **s == Sent::Acquire).count(), 4);
        assert_eq!(di.data_after(0x5C).len(), 96 * 2);
    }

    #[test]
    fn generic_stream() {
        let (mut disp, di, _) = init_display(DisplaySize::Display128x128);
        stream_diagonal(&mut disp).unwrap();
        #[rustfmt::skip]
        di.check_multi(sends!(
            acquire,
            0x15, [0, 1],
            0x75, [0, 1],
            0x5C,
            [0xFF, 0xFF],
            [0x00, 0x00],
            [0x00, 0x00],
            [0xFF, 0xFF],
            release
        ));
    }

    #[test]
    fn generic_read_and_control() {
        fn rotate_and_read<D>(disp: &mut D) -> Result<u16, D::Error>
        where
            D: HardwareControl + HardwareStreamRead<u16>,
        {
            let degrees = disp.control(ControlRequest::Orientation, 180)?;
            let mut out = [0u16; 1];
            disp.read_area(Area::new(0, 0, 1, 1), &mut out)?;
            Ok(degrees)
        }

        let (mut disp, _, _) = init_display(DisplaySize::Display128x128);
        assert_eq!(rotate_and_read(&mut disp), Err(Error::NotSupported));
        assert_eq!(disp.state().orientation.degrees(), 180);
    }

    #[test]
    fn generic_clear() {
        fn blank<D: HardwareClear<Rgb>>(disp: &mut D) -> Result<(), D::Error> {
            disp.clear(Rgb::BLACK)
        }

        let (mut disp, di, _) = init_display(DisplaySize::Display128x96);
        blank(&mut disp).unwrap();
        assert_eq!(di.data_after(0x5C), [0u8; 128 * 96 * 2]);
    }
}
