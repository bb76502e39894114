//! Power, orientation, backlight and contrast control.
//!
//! Every request is idempotent: asking for the state the display is already in sends nothing.

use crate::board::Board;
use crate::command::*;
use crate::config::master_contrast;
use crate::display::Display;
use crate::error::Error;
use crate::interface::{BusSession, DisplayInterface};

/// 65k color, COM split odd/even, and C->B->A color order are common to every orientation.
const REMAP_BASE: Remap = Remap::COLOR_DEPTH_65K
    .union(Remap::COM_SPLIT)
    .union(Remap::COLOR_REMAP);

pub(crate) const REMAP_ROTATE_0: Remap = REMAP_BASE.union(Remap::SCAN_BOTTOM_UP);
const REMAP_ROTATE_90: Remap = REMAP_ROTATE_0.union(Remap::COLUMN_REMAP);
const REMAP_ROTATE_180: Remap = REMAP_BASE;
const REMAP_ROTATE_180_MIRRORED: Remap = REMAP_BASE.union(Remap::COLUMN_REMAP);
const REMAP_ROTATE_270: Remap = REMAP_BASE.union(Remap::VERTICAL_INCREMENT);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerMode {
    Off,
    Sleep,
    DeepSleep,
    On,
}

impl PowerMode {
    /// Decode a raw control value: 0 off, 1 sleep, 2 deep sleep, 3 on.
    pub fn from_raw(value: u16) -> Option<Self> {
        match value {
            0 => Some(PowerMode::Off),
            1 => Some(PowerMode::Sleep),
            2 => Some(PowerMode::DeepSleep),
            3 => Some(PowerMode::On),
            _ => None,
        }
    }

    pub fn to_raw(self) -> u16 {
        match self {
            PowerMode::Off => 0,
            PowerMode::Sleep => 1,
            PowerMode::DeepSleep => 2,
            PowerMode::On => 3,
        }
    }
}

/// Clockwise rotation of the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Rotate0,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Orientation {
    /// Decode a raw control value in degrees.
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Orientation::Rotate0),
            90 => Some(Orientation::Rotate90),
            180 => Some(Orientation::Rotate180),
            270 => Some(Orientation::Rotate270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Orientation::Rotate0 => 0,
            Orientation::Rotate90 => 90,
            Orientation::Rotate180 => 180,
            Orientation::Rotate270 => 270,
        }
    }

    /// Whether width and height trade places relative to the native geometry.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Orientation::Rotate90 | Orientation::Rotate270)
    }

    /// The remap register writes that select this orientation, in order.
    fn remaps(self) -> &'static [Remap] {
        match self {
            Orientation::Rotate0 => &[REMAP_ROTATE_0],
            Orientation::Rotate90 => &[REMAP_ROTATE_90],
            // Both writes are needed to reach the mirrored state.
            Orientation::Rotate180 => &[REMAP_ROTATE_180, REMAP_ROTATE_180_MIRRORED],
            Orientation::Rotate270 => &[REMAP_ROTATE_270],
        }
    }
}

/// Selects what a raw `Display::control` request changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlRequest {
    /// Value is a `PowerMode` in its raw encoding.
    Power,
    /// Value is a rotation in degrees.
    Orientation,
    /// Value is a percentage.
    Backlight,
    /// Value is a percentage.
    Contrast,
}

impl<DI, B> Display<DI, B>
where
    DI: DisplayInterface,
    B: Board,
{
    /// Move the panel into power mode `mode`. Returns the mode now in effect.
    pub fn set_power_mode(&mut self, mode: PowerMode) -> Result<PowerMode, Error<DI::Error>> {
        if self.state.power_mode == mode {
            return Ok(mode);
        }

        let mut session = BusSession::acquire(&mut self.iface)?;
        match mode {
            PowerMode::Off => Command::SetDisplayMode(DisplayMode::AllOff).send(&mut *session)?,
            PowerMode::Sleep | PowerMode::DeepSleep => {
                Command::SetSleepMode(true).send(&mut *session)?
            }
            PowerMode::On => {
                Command::SetSleepMode(false).send(&mut *session)?;
                Command::SetDisplayMode(DisplayMode::AllOn).send(&mut *session)?;
            }
        }
        session.release()?;

        log::trace!("power mode {:?} -> {:?}", self.state.power_mode, mode);
        self.state.power_mode = mode;
        Ok(mode)
    }

    /// Whether the panel can show `orientation`. Quarter turns need a square panel, since the
    /// MUX ratio limits the scanned RAM rows to the native height.
    pub fn supports_orientation(&self, orientation: Orientation) -> bool {
        !orientation.swaps_axes() || self.size.is_square()
    }

    /// Rotate the image. Width and height in the display state swap for quarter turns, and every
    /// area given afterwards is in the rotated coordinates. Quarter turns on a non-square panel
    /// fail with `Error::NotSupported` before any bus activity.
    pub fn set_orientation(
        &mut self,
        orientation: Orientation,
    ) -> Result<Orientation, Error<DI::Error>> {
        if self.state.orientation == orientation {
            return Ok(orientation);
        }
        if !self.supports_orientation(orientation) {
            log::debug!("{:?} not supported on {:?}", orientation, self.size);
            return Err(Error::NotSupported);
        }

        let mut session = BusSession::acquire(&mut self.iface)?;
        for remap in orientation.remaps() {
            Command::SetRemap(*remap).send(&mut *session)?;
        }
        Command::WriteRam.send(&mut *session)?;
        session.release()?;

        let (width, height) = self.size.dimensions();
        let (width, height) = match orientation.swaps_axes() {
            true => (height, width),
            false => (width, height),
        };
        log::trace!(
            "orientation {:?} -> {:?}, now {}x{}",
            self.state.orientation,
            orientation,
            width,
            height
        );
        self.state.orientation = orientation;
        self.state.width = width;
        self.state.height = height;
        Ok(orientation)
    }

    /// Set the backlight through the board, clamped to 100 percent. Nothing is sent to the
    /// controller. Returns the level now in effect.
    pub fn set_backlight(&mut self, percent: u8) -> u8 {
        let level = percent.min(100);
        self.board.set_backlight(level);
        self.state.backlight = level;
        level
    }

    /// Scale the master contrast register, clamped to 100 percent. Returns the level now in
    /// effect.
    pub fn set_contrast(&mut self, percent: u8) -> Result<u8, Error<DI::Error>> {
        let level = percent.min(100);
        if self.state.contrast == level {
            return Ok(level);
        }

        let mut session = BusSession::acquire(&mut self.iface)?;
        Command::SetMasterContrast(master_contrast(level)).send(&mut *session)?;
        session.release()?;

        self.state.contrast = level;
        Ok(level)
    }

    /// Apply a control request given as a raw value, returning the resulting raw value. Values
    /// the panel cannot take are ignored and the current value is returned.
    pub fn control(
        &mut self,
        request: ControlRequest,
        value: u16,
    ) -> Result<u16, Error<DI::Error>> {
        match request {
            ControlRequest::Power => match PowerMode::from_raw(value) {
                Some(mode) => self.set_power_mode(mode).map(PowerMode::to_raw),
                None => {
                    log::debug!("ignoring unsupported power mode {}", value);
                    Ok(self.state.power_mode.to_raw())
                }
            },
            ControlRequest::Orientation => match Orientation::from_degrees(value)
                .filter(|o| self.supports_orientation(*o))
            {
                Some(orientation) => self.set_orientation(orientation).map(Orientation::degrees),
                None => {
                    log::debug!("ignoring unsupported orientation {}", value);
                    Ok(self.state.orientation.degrees())
                }
            },
            ControlRequest::Backlight => {
                Ok(u16::from(self.set_backlight(value.min(100) as u8)))
            }
            ControlRequest::Contrast => self.set_contrast(value.min(100) as u8).map(u16::from),
        }
    }
}
