//! The main API to the display driver. It owns the transport and the board, runs the
//! initialization sequence, and tracks the state the control requests change.

pub mod control;
pub mod region;

use embedded_hal::blocking::delay::DelayMs;

use crate::board::Board;
use crate::command::*;
use crate::config::Config;
use crate::display::control::{Orientation, PowerMode};
use crate::error::Error;
use crate::interface::{BusSession, DisplayInterface};

/// Length of each half of the reset pulse, in milliseconds.
const RESET_PULSE_MS: u8 = 20;

/// The panel geometries built around the SSD1351.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplaySize {
    Display128x128,
    Display128x96,
}

impl DisplaySize {
    /// Native `(width, height)` in pixels, before any rotation.
    pub fn dimensions(self) -> (u8, u8) {
        match self {
            DisplaySize::Display128x128 => (128, 128),
            DisplaySize::Display128x96 => (128, 96),
        }
    }

    pub fn is_square(self) -> bool {
        let (width, height) = self.dimensions();
        width == height
    }
}

/// The state of the display as last programmed by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayState {
    /// Width in pixels in the current orientation.
    pub width: u8,
    /// Height in pixels in the current orientation.
    pub height: u8,
    pub orientation: Orientation,
    pub power_mode: PowerMode,
    /// Backlight level in percent.
    pub backlight: u8,
    /// Contrast level in percent.
    pub contrast: u8,
}

/// A driver for an SSD1351 display.
pub struct Display<DI, B>
where
    DI: DisplayInterface,
    B: Board,
{
    iface: DI,
    board: B,
    size: DisplaySize,
    config: Config,
    state: DisplayState,
}

impl<DI, B> Display<DI, B>
where
    DI: DisplayInterface,
    B: Board,
{
    /// Construct a new display driver for a panel of size `size`, which is connected to the
    /// interface `iface` and brought up through `board`. Nothing is sent until `init`.
    pub fn new(iface: DI, board: B, size: DisplaySize) -> Self {
        Self::with_config(iface, board, size, Config::default())
    }

    /// Like `new`, with panel settings other than the defaults.
    pub fn with_config(iface: DI, board: B, size: DisplaySize, config: Config) -> Self {
        let (width, height) = size.dimensions();
        Display {
            iface,
            board,
            size,
            config,
            state: DisplayState {
                width,
                height,
                orientation: Orientation::Rotate0,
                power_mode: PowerMode::Off,
                backlight: 0,
                contrast: 0,
            },
        }
    }

    /// Reset and initialize the display, leaving it awake, unrotated, and blanked to black.
    ///
    /// The order of the commands and their values are what the panel needs to come up reliably;
    /// with the default `Config` the sequence is fixed.
    pub fn init<D>(&mut self, delay: &mut D) -> Result<DisplayState, Error<DI::Error>>
    where
        D: DelayMs<u8>,
    {
        log::debug!("initializing SSD1351 {:?}", self.size);
        self.board.init_board();

        self.board.set_reset_pin(true);
        delay.delay_ms(RESET_PULSE_MS);
        self.board.set_reset_pin(false);
        delay.delay_ms(RESET_PULSE_MS);

        let (width, height) = self.size.dimensions();
        let mut session = BusSession::acquire(&mut self.iface)?;
        let iface = &mut *session;

        Command::SetCommandLock(CommandLock::Unlock).send(iface)?;
        Command::SetCommandLock(CommandLock::UnlockRestricted).send(iface)?;
        Command::SetSleepMode(true).send(iface)?;

        self.config.send_clock(iface)?;
        Command::SetMuxRatio(height).send(iface)?;
        Command::SetRemap(control::REMAP_ROTATE_0).send(iface)?;

        Command::SetColumnAddress(0, width - 1).send(iface)?;
        Command::SetRowAddress(0, height - 1).send(iface)?;

        Command::SetStartLine(0).send(iface)?;
        Command::SetDisplayOffset(0).send(iface)?;
        Command::SetGpio(GpioMode::HiZInputDisabled, GpioMode::HiZInputDisabled).send(iface)?;
        Command::SetFunctionSelection(true).send(iface)?;
        self.config.send_drive(iface)?;
        Command::SetDisplayMode(DisplayMode::Normal).send(iface)?;

        self.config.send_contrast(iface)?;
        Command::SetSleepMode(false).send(iface)?;

        // Blank the whole frame; display RAM contents are undefined after reset.
        Command::WriteRam.send(iface)?;
        region::write_pixels(
            iface,
            itertools::repeat_n(0u16, usize::from(width) * usize::from(height)),
        )?;

        session.release()?;
        self.board.post_init_board();

        let backlight = self.config.initial_backlight;
        self.board.set_backlight(backlight);

        self.state = DisplayState {
            width,
            height,
            orientation: Orientation::Rotate0,
            power_mode: PowerMode::On,
            backlight,
            contrast: self.config.initial_contrast,
        };
        log::debug!("SSD1351 initialized: {:?}", self.state);
        Ok(self.state)
    }

    /// The state of the display as last programmed.
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Give back the interface and board.
    pub fn release(self) -> (DI, B) {
        (self.iface, self.board)
    }
}
