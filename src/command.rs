//! The command set for the SSD1351.
//!
//! The display RAM of the SSD1351 is arranged in 128 rows and 128 columns of 16-bit (65k color)
//! pixels. Pixel data is written two bytes per pixel, high byte first, into the window selected
//! by `SetColumnAddress` and `SetRowAddress` after a `WriteRam` command.

use core::ops::BitOr;

use crate::error::Error;
use crate::interface::DisplayInterface;

pub mod consts {
    //! Constants describing the address space of the SSD1351.

    pub const NUM_PIXEL_COLS: u8 = 128;
    pub const NUM_PIXEL_ROWS: u8 = 128;
    pub const PIXEL_COL_MAX: u8 = NUM_PIXEL_COLS - 1;
    pub const PIXEL_ROW_MAX: u8 = NUM_PIXEL_ROWS - 1;
}

use self::consts::*;

/// The value of the re-map / color depth register (`SetRemap`). Bits combine with `|`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Remap(u8);

impl Remap {
    /// Vertical address increment: the row address advances as pixels are written, then the
    /// column address.
    pub const VERTICAL_INCREMENT: Remap = Remap(1 << 0);
    /// Column addresses 0->127 map to segments 127->0.
    pub const COLUMN_REMAP: Remap = Remap(1 << 1);
    /// Color channels are taken in C->B->A order from the pixel data.
    pub const COLOR_REMAP: Remap = Remap(1 << 2);
    /// COM lines scan bottom to top.
    pub const SCAN_BOTTOM_UP: Remap = Remap(1 << 4);
    /// Odd/even split of the COM lines.
    pub const COM_SPLIT: Remap = Remap(1 << 5);
    /// 65k color depth, two bytes per pixel.
    pub const COLOR_DEPTH_65K: Remap = Remap(0b01 << 6);

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// `const` form of `|`, for building register values in constants.
    pub const fn union(self, other: Remap) -> Remap {
        Remap(self.0 | other.0)
    }
}

impl BitOr for Remap {
    type Output = Remap;

    fn bitor(self, rhs: Remap) -> Remap {
        self.union(rhs)
    }
}

/// Setting of the display mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// All pixels are turned off regardless of the display RAM contents.
    AllOff,
    /// All pixels are turned on at full brightness regardless of the display RAM contents.
    AllOn,
    /// The display operates normally, showing the image in the display RAM.
    Normal,
    /// The display shows the image in the display RAM with inverted colors.
    Inverse,
}

/// Mode of one of the two general purpose pins of the SSD1351.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GpioMode {
    /// High impedance, input disabled.
    HiZInputDisabled,
    /// High impedance, input enabled.
    HiZInputEnabled,
    /// Output driven low.
    OutputLow,
    /// Output driven high.
    OutputHigh,
}

impl GpioMode {
    fn bits(self) -> u8 {
        match self {
            GpioMode::HiZInputDisabled => 0b00,
            GpioMode::HiZInputEnabled => 0b01,
            GpioMode::OutputLow => 0b10,
            GpioMode::OutputHigh => 0b11,
        }
    }
}

/// Settings of the command lock register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandLock {
    /// Unlock the MCU interface so that commands are accepted.
    Unlock,
    /// Lock the MCU interface; every command except `SetCommandLock` is ignored.
    Lock,
    /// Make the restricted commands (A2, B1, B3, BB, BE, C1) inaccessible.
    LockRestricted,
    /// Make the restricted commands (A2, B1, B3, BB, BE, C1) accessible.
    UnlockRestricted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Set the column start and end address range when writing to the display RAM. The column
    /// address pointer is reset to the start column address. Range is 0-127.
    SetColumnAddress(u8, u8),
    /// Set the row start and end address range when writing to the display RAM. The row address
    /// pointer is reset to the start row address. Range is 0-127.
    SetRowAddress(u8, u8),
    /// Arm the controller to accept pixel data into the window set by `SetColumnAddress` and
    /// `SetRowAddress`. All data transferred after this command is written to display RAM.
    WriteRam,
    /// Set the address increment direction, column remap, color channel order, COM scan
    /// direction, COM split and color depth.
    SetRemap(Remap),
    /// Set the display start line, rolling the displayed image upwards. Range is 0-127.
    SetStartLine(u8),
    /// Set the vertical COM line offset. Range is 0-127.
    SetDisplayOffset(u8),
    /// Set the display operating mode. See enum for details.
    SetDisplayMode(DisplayMode),
    /// Enable or disable the internal VDD regulator.
    SetFunctionSelection(bool),
    /// Control sleep mode.
    SetSleepMode(bool),
    /// Set the refresh phase lengths. The first phase (reset) can be set from 5-31 DCLKs, and the
    /// second (first pre-charge) can be set from 3-15 DCLKs.
    SetPhaseLengths(u8, u8),
    /// Set the oscillator frequency Fosc (0-15) and the display clock divider DIVSET (0-10),
    /// where DCLK is produced by dividing Fosc by 2^DIVSET.
    SetClockFoscDivset(u8, u8),
    /// Select the external (`true`) or internal segment low voltage.
    SetSegmentLowVoltage(bool),
    /// Set the modes of GPIO0 and GPIO1.
    SetGpio(GpioMode, GpioMode),
    /// Set the second pre-charge period. Range 1-15 DCLKs.
    SetSecondPrechargePeriod(u8),
    /// Set the pre-charge voltage level, from 0.2*Vcc to 0.6*Vcc. Range 0-31.
    SetPreChargeVoltage(u8),
    /// Set the COM deselect voltage level (VCOMH), from 0.72*Vcc to 0.86*Vcc. Range 0-7.
    SetComDeselectVoltage(u8),
    /// Set the contrast current of the A, B and C color channels. Range 0-255 each.
    SetContrastCurrents(u8, u8, u8),
    /// Set the master contrast control, uniformly reducing the output of all channels by 0-15
    /// sixteenths. Range 0 (maximum dimming) to 15 (no change).
    SetMasterContrast(u8),
    /// Set the MUX ratio, which controls the number of active COM lines. Range 16-128.
    SetMuxRatio(u8),
    /// Set the command lock state.
    SetCommandLock(CommandLock),
}

macro_rules! ok_command {
    ($buf:ident, $cmd:expr,[]) => {
        Ok(($cmd, &$buf[..0]))
    };
    ($buf:ident, $cmd:expr,[$arg0:expr]) => {{
        $buf[0] = $arg0;
        Ok(($cmd, &$buf[..1]))
    }};
    ($buf:ident, $cmd:expr,[$arg0:expr, $arg1:expr]) => {{
        $buf[0] = $arg0;
        $buf[1] = $arg1;
        Ok(($cmd, &$buf[..2]))
    }};
    ($buf:ident, $cmd:expr,[$arg0:expr, $arg1:expr, $arg2:expr]) => {{
        $buf[0] = $arg0;
        $buf[1] = $arg1;
        $buf[2] = $arg2;
        Ok(($cmd, &$buf[..3]))
    }};
}

impl Command {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: DisplayInterface,
    {
        let mut arg_buf = [0u8; 3];
        let encoded: Result<(u8, &[u8]), Error<DI::Error>> = match self {
            Command::SetColumnAddress(start, end) => match (start, end) {
                (0..=PIXEL_COL_MAX, 0..=PIXEL_COL_MAX) => ok_command!(arg_buf, 0x15, [start, end]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetRowAddress(start, end) => match (start, end) {
                (0..=PIXEL_ROW_MAX, 0..=PIXEL_ROW_MAX) => ok_command!(arg_buf, 0x75, [start, end]),
                _ => Err(Error::OutOfRange),
            },
            Command::WriteRam => ok_command!(arg_buf, 0x5C, []),
            Command::SetRemap(remap) => ok_command!(arg_buf, 0xA0, [remap.bits()]),
            Command::SetStartLine(line) => match line {
                0..=PIXEL_ROW_MAX => ok_command!(arg_buf, 0xA1, [line]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetDisplayOffset(line) => match line {
                0..=PIXEL_ROW_MAX => ok_command!(arg_buf, 0xA2, [line]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetDisplayMode(mode) => ok_command!(
                arg_buf,
                match mode {
                    DisplayMode::AllOff => 0xA4,
                    DisplayMode::AllOn => 0xA5,
                    DisplayMode::Normal => 0xA6,
                    DisplayMode::Inverse => 0xA7,
                },
                []
            ),
            Command::SetFunctionSelection(internal_vdd) => {
                ok_command!(arg_buf, 0xAB, [internal_vdd as u8])
            }
            Command::SetSleepMode(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => 0xAE,
                    false => 0xAF,
                },
                []
            ),
            Command::SetPhaseLengths(phase_1, phase_2) => match (phase_1, phase_2) {
                (5..=31, 3..=15) => {
                    let p1 = (phase_1 - 1) >> 1;
                    let p2 = 0xF0 & (phase_2 << 4);
                    ok_command!(arg_buf, 0xB1, [p1 | p2])
                }
                _ => Err(Error::OutOfRange),
            },
            Command::SetClockFoscDivset(fosc, divset) => match (fosc, divset) {
                (0..=15, 0..=10) => ok_command!(arg_buf, 0xB3, [fosc << 4 | divset]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetSegmentLowVoltage(external) => {
                let vsl = match external {
                    true => 0xA0,
                    false => 0xA2,
                };
                ok_command!(arg_buf, 0xB4, [vsl, 0xB5, 0x55])
            }
            Command::SetGpio(gpio0, gpio1) => {
                ok_command!(arg_buf, 0xB5, [gpio1.bits() << 2 | gpio0.bits()])
            }
            Command::SetSecondPrechargePeriod(period) => match period {
                1..=15 => ok_command!(arg_buf, 0xB6, [period]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetPreChargeVoltage(voltage) => match voltage {
                0..=31 => ok_command!(arg_buf, 0xBB, [voltage]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetComDeselectVoltage(voltage) => match voltage {
                0..=7 => ok_command!(arg_buf, 0xBE, [voltage]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetContrastCurrents(a, b, c) => ok_command!(arg_buf, 0xC1, [a, b, c]),
            Command::SetMasterContrast(contrast) => match contrast {
                0..=15 => ok_command!(arg_buf, 0xC7, [contrast]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetMuxRatio(ratio) => match ratio {
                16..=NUM_PIXEL_ROWS => ok_command!(arg_buf, 0xCA, [ratio - 1]),
                _ => Err(Error::OutOfRange),
            },
            Command::SetCommandLock(lock) => {
                let l = match lock {
                    CommandLock::Unlock => 0x12,
                    CommandLock::Lock => 0x16,
                    CommandLock::LockRestricted => 0xB0,
                    CommandLock::UnlockRestricted => 0xB1,
                };
                ok_command!(arg_buf, 0xFD, [l])
            }
        };
        let (cmd, data) = encoded?;
        iface.send_command(cmd)?;
        if !data.is_empty() {
            iface.send_data(data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::test_spy::TestSpyInterface;

    #[test]
    fn set_column_address() {
        let mut di = TestSpyInterface::new();
        Command::SetColumnAddress(23, 42).send(&mut di).unwrap();
        di.check(0x15, &[23, 42]);
        assert_eq!(
            Command::SetColumnAddress(128, 42).send(&mut di),
            Err(Error::OutOfRange)
        );
        assert_eq!(
            Command::SetColumnAddress(23, 255).send(&mut di),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn set_row_address() {
        let mut di = TestSpyInterface::new();
        Command::SetRowAddress(0, 127).send(&mut di).unwrap();
        di.check(0x75, &[0, 127]);
        assert_eq!(
            Command::SetRowAddress(128, 42).send(&mut di),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn out_of_range_sends_nothing() {
        let mut di = TestSpyInterface::new();
        assert!(Command::SetRowAddress(23, 200).send(&mut di).is_err());
        assert!(di.sent().is_empty());
    }

    #[test]
    fn set_remap() {
        let mut di = TestSpyInterface::new();
        Command::SetRemap(Remap(0)).send(&mut di).unwrap();
        di.check(0xA0, &[0x00]);
        di.clear();
        Command::SetRemap(
            Remap::COLOR_DEPTH_65K | Remap::COM_SPLIT | Remap::SCAN_BOTTOM_UP | Remap::COLOR_REMAP,
        )
        .send(&mut di)
        .unwrap();
        di.check(0xA0, &[0b01110100]);
        di.clear();
        Command::SetRemap(Remap::VERTICAL_INCREMENT | Remap::COLUMN_REMAP)
            .send(&mut di)
            .unwrap();
        di.check(0xA0, &[0b00000011]);
    }

    #[test]
    fn write_ram() {
        let mut di = TestSpyInterface::new();
        Command::WriteRam.send(&mut di).unwrap();
        di.check(0x5C, &[]);
    }

    #[test]
    fn set_start_line() {
        let mut di = TestSpyInterface::new();
        Command::SetStartLine(23).send(&mut di).unwrap();
        di.check(0xA1, &[23]);
        assert_eq!(
            Command::SetStartLine(128).send(&mut di),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn set_display_offset() {
        let mut di = TestSpyInterface::new();
        Command::SetDisplayOffset(23).send(&mut di).unwrap();
        di.check(0xA2, &[23]);
        assert_eq!(
            Command::SetDisplayOffset(128).send(&mut di),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn set_display_mode() {
        let mut di = TestSpyInterface::new();
        Command::SetDisplayMode(DisplayMode::AllOff)
            .send(&mut di)
            .unwrap();
        di.check(0xA4, &[]);
        di.clear();
        Command::SetDisplayMode(DisplayMode::AllOn)
            .send(&mut di)
            .unwrap();
        di.check(0xA5, &[]);
        di.clear();
        Command::SetDisplayMode(DisplayMode::Normal)
            .send(&mut di)
            .unwrap();
        di.check(0xA6, &[]);
        di.clear();
        Command::SetDisplayMode(DisplayMode::Inverse)
            .send(&mut di)
            .unwrap();
        di.check(0xA7, &[]);
    }

    #[test]
    fn set_function_selection() {
        let mut di = TestSpyInterface::new();
        Command::SetFunctionSelection(true).send(&mut di).unwrap();
        di.check(0xAB, &[0x01]);
        di.clear();
        Command::SetFunctionSelection(false).send(&mut di).unwrap();
        di.check(0xAB, &[0x00]);
    }

    #[test]
    fn sleep_mode() {
        let mut di = TestSpyInterface::new();
        Command::SetSleepMode(true).send(&mut di).unwrap();
        di.check(0xAE, &[]);
        di.clear();
        Command::SetSleepMode(false).send(&mut di).unwrap();
        di.check(0xAF, &[]);
    }

    #[test]
    fn set_phase_lengths() {
        let mut di = TestSpyInterface::new();
        Command::SetPhaseLengths(5, 3).send(&mut di).unwrap();
        di.check(0xB1, &[0x32]);
        di.clear();
        Command::SetPhaseLengths(7, 3).send(&mut di).unwrap();
        di.check(0xB1, &[0x33]);
        di.clear();
        Command::SetPhaseLengths(31, 15).send(&mut di).unwrap();
        di.check(0xB1, &[0xFF]);
        assert_eq!(
            Command::SetPhaseLengths(4, 3).send(&mut di),
            Err(Error::OutOfRange)
        );
        assert_eq!(
            Command::SetPhaseLengths(5, 16).send(&mut di),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn set_clock_fosc_divset() {
        let mut di = TestSpyInterface::new();
        Command::SetClockFoscDivset(15, 1).send(&mut di).unwrap();
        di.check(0xB3, &[0xF1]);
        di.clear();
        Command::SetClockFoscDivset(0, 10).send(&mut di).unwrap();
        di.check(0xB3, &[0x0A]);
        assert_eq!(
            Command::SetClockFoscDivset(0, 11).send(&mut di),
            Err(Error::OutOfRange)
        );
        assert_eq!(
            Command::SetClockFoscDivset(16, 0).send(&mut di),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn set_segment_low_voltage() {
        let mut di = TestSpyInterface::new();
        Command::SetSegmentLowVoltage(true).send(&mut di).unwrap();
        di.check(0xB4, &[0xA0, 0xB5, 0x55]);
        di.clear();
        Command::SetSegmentLowVoltage(false).send(&mut di).unwrap();
        di.check(0xB4, &[0xA2, 0xB5, 0x55]);
    }

    #[test]
    fn set_gpio() {
        let mut di = TestSpyInterface::new();
        Command::SetGpio(GpioMode::HiZInputDisabled, GpioMode::HiZInputDisabled)
            .send(&mut di)
            .unwrap();
        di.check(0xB5, &[0x00]);
        di.clear();
        Command::SetGpio(GpioMode::OutputHigh, GpioMode::OutputLow)
            .send(&mut di)
            .unwrap();
        di.check(0xB5, &[0b1011]);
    }

    #[test]
    fn set_second_precharge_period() {
        let mut di = TestSpyInterface::new();
        Command::SetSecondPrechargePeriod(1).send(&mut di).unwrap();
        di.check(0xB6, &[1]);
        di.clear();
        Command::SetSecondPrechargePeriod(15).send(&mut di).unwrap();
        di.check(0xB6, &[15]);
        assert_eq!(
            Command::SetSecondPrechargePeriod(0).send(&mut di),
            Err(Error::OutOfRange)
        );
        assert_eq!(
            Command::SetSecondPrechargePeriod(16).send(&mut di),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn set_pre_charge_voltage() {
        let mut di = TestSpyInterface::new();
        Command::SetPreChargeVoltage(0x17).send(&mut di).unwrap();
        di.check(0xBB, &[0x17]);
        assert_eq!(
            Command::SetPreChargeVoltage(32).send(&mut di),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn set_com_deselect_voltage() {
        let mut di = TestSpyInterface::new();
        Command::SetComDeselectVoltage(5).send(&mut di).unwrap();
        di.check(0xBE, &[5]);
        assert_eq!(
            Command::SetComDeselectVoltage(8).send(&mut di),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn set_contrast_currents() {
        let mut di = TestSpyInterface::new();
        Command::SetContrastCurrents(0xC8, 0x80, 0xC8)
            .send(&mut di)
            .unwrap();
        di.check(0xC1, &[0xC8, 0x80, 0xC8]);
    }

    #[test]
    fn set_master_contrast() {
        let mut di = TestSpyInterface::new();
        Command::SetMasterContrast(15).send(&mut di).unwrap();
        di.check(0xC7, &[15]);
        assert_eq!(
            Command::SetMasterContrast(16).send(&mut di),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn set_mux_ratio() {
        let mut di = TestSpyInterface::new();
        Command::SetMuxRatio(128).send(&mut di).unwrap();
        di.check(0xCA, &[127]);
        di.clear();
        Command::SetMuxRatio(96).send(&mut di).unwrap();
        di.check(0xCA, &[95]);
        assert_eq!(
            Command::SetMuxRatio(15).send(&mut di),
            Err(Error::OutOfRange)
        );
        assert_eq!(
            Command::SetMuxRatio(129).send(&mut di),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn set_command_lock() {
        let mut di = TestSpyInterface::new();
        Command::SetCommandLock(CommandLock::Unlock)
            .send(&mut di)
            .unwrap();
        di.check(0xFD, &[0x12]);
        di.clear();
        Command::SetCommandLock(CommandLock::UnlockRestricted)
            .send(&mut di)
            .unwrap();
        di.check(0xFD, &[0xB1]);
        di.clear();
        Command::SetCommandLock(CommandLock::Lock)
            .send(&mut di)
            .unwrap();
        di.check(0xFD, &[0x16]);
        di.clear();
        Command::SetCommandLock(CommandLock::LockRestricted)
            .send(&mut di)
            .unwrap();
        di.check(0xFD, &[0xB0]);
    }
}
