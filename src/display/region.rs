//! Drawing into rectangular areas of the display.

use crate::board::Board;
use crate::color::NativeColor;
use crate::command::Command;
use crate::display::Display;
use crate::error::Error;
use crate::interface::{BusSession, DisplayInterface};

/// Size in bytes of the buffer pixel data is staged in before each transfer.
const PIXEL_CHUNK_BYTES: usize = 32;

/// A rectangle of pixels in the coordinates of the current orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Area {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
}

impl Area {
    pub fn new(x: u8, y: u8, width: u8, height: u8) -> Self {
        Area {
            x,
            y,
            width,
            height,
        }
    }

    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Whether the area is non-empty and lies entirely within a `width` by `height` display.
    pub fn fits_within(&self, width: u8, height: u8) -> bool {
        self.width > 0
            && self.height > 0
            && u16::from(self.x) + u16::from(self.width) <= u16::from(width)
            && u16::from(self.y) + u16::from(self.height) <= u16::from(height)
    }
}

/// Point the column and row address registers at `area` and put the display in write mode. The
/// area must already be validated.
fn set_window<DI>(iface: &mut DI, area: Area) -> Result<(), Error<DI::Error>>
where
    DI: DisplayInterface,
{
    log::trace!("window {:?}", area);
    Command::SetColumnAddress(area.x, area.x + (area.width - 1)).send(iface)?;
    Command::SetRowAddress(area.y, area.y + (area.height - 1)).send(iface)?;
    Command::WriteRam.send(iface)
}

/// Send native pixel words as data, high byte first, until the iterator is exhausted.
///
/// Uses constant memory by alternately filling a chunk buffer from the iterator and writing it
/// to the display. Only the final chunk may be short, and an empty chunk is never sent.
pub(crate) fn write_pixels<DI, I>(iface: &mut DI, pixels: I) -> Result<(), Error<DI::Error>>
where
    DI: DisplayInterface,
    I: IntoIterator<Item = u16>,
{
    let mut pixels = pixels.into_iter();
    let mut buf = [0u8; PIXEL_CHUNK_BYTES];

    loop {
        let mut chunk_len = 0;
        for slot in buf.chunks_exact_mut(2) {
            match pixels.next() {
                Some(pixel) => {
                    slot.copy_from_slice(&pixel.to_be_bytes());
                    chunk_len += 2;
                }
                None => break,
            }
        }

        if chunk_len > 0 {
            iface.send_data(&buf[..chunk_len])?;
        }

        // A short chunk means the iterator ran dry.
        if chunk_len != buf.len() {
            return Ok(());
        }
    }
}

/// An open pixel write into an area of the display, holding the bus until it is stopped or
/// dropped.
///
/// Pixels fill the area left to right, then top to bottom. Writing more pixels than the area
/// holds wraps around to its top left corner.
pub struct WriteStream<'di, DI>
where
    DI: DisplayInterface,
{
    session: BusSession<'di, DI>,
}

impl<'di, DI> WriteStream<'di, DI>
where
    DI: DisplayInterface,
{
    pub fn write_color<C: NativeColor>(&mut self, color: C) -> Result<(), Error<DI::Error>> {
        self.session.send_data(&color.to_native().to_be_bytes())?;
        Ok(())
    }

    /// Write a run of pixels, batched into as few transfers as the staging buffer allows.
    pub fn write_colors<C, I>(&mut self, colors: I) -> Result<(), Error<DI::Error>>
    where
        C: NativeColor,
        I: IntoIterator<Item = C>,
    {
        write_pixels(&mut *self.session, colors.into_iter().map(C::to_native))
    }

    /// End the write and release the bus.
    pub fn stop(self) -> Result<(), Error<DI::Error>> {
        self.session.release()?;
        Ok(())
    }
}

impl<DI, B> Display<DI, B>
where
    DI: DisplayInterface,
    B: Board,
{
    fn check_area(&self, area: Area) -> Result<Area, Error<DI::Error>> {
        if area.fits_within(self.state.width, self.state.height) {
            Ok(area)
        } else {
            log::debug!(
                "rejecting area {:?} on {}x{} display",
                area,
                self.state.width,
                self.state.height
            );
            Err(Error::InvalidRegion(area))
        }
    }

    /// Open `area` for writing and return the stream its pixels are written to.
    pub fn write_start(&mut self, area: Area) -> Result<WriteStream<'_, DI>, Error<DI::Error>> {
        let area = self.check_area(area)?;
        let mut session = BusSession::acquire(&mut self.iface)?;
        set_window(&mut *session, area)?;
        Ok(WriteStream { session })
    }

    /// Fill `area` with a single color.
    pub fn fill_area<C: NativeColor>(
        &mut self,
        area: Area,
        color: C,
    ) -> Result<(), Error<DI::Error>> {
        let area = self.check_area(area)?;
        let mut session = BusSession::acquire(&mut self.iface)?;
        set_window(&mut *session, area)?;
        write_pixels(
            &mut *session,
            itertools::repeat_n(color.to_native(), area.pixel_count()),
        )?;
        session.release()?;
        Ok(())
    }

    /// Fill the whole display with a single color.
    pub fn clear<C: NativeColor>(&mut self, color: C) -> Result<(), Error<DI::Error>> {
        let area = Area::new(0, 0, self.state.width, self.state.height);
        self.fill_area(area, color)
    }

    /// Reading back display RAM is not supported over the write-only serial interface.
    pub fn read_area<C: NativeColor>(
        &mut self,
        _area: Area,
        _out: &mut [C],
    ) -> Result<(), Error<DI::Error>> {
        Err(Error::NotSupported)
    }
}
