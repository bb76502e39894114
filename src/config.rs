//! Defines the register values of commands in the SSD1351 that are associated with
//! relatively-static panel configuration, plus the levels the display starts at.
//!
//! `Config::default()` reproduces the register values of the reference 128x128 module
//! initialization exactly. The builder methods override them for modules whose datasheets call
//! for different drive settings.

use crate::command::*;
use crate::error::Error;
use crate::interface;

/// A configuration for the display, sent during `Display::init`.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    clock_fosc_divset_cmd: Command,
    phase_lengths_cmd: Command,
    com_deselect_voltage_cmd: Command,
    precharge_voltage_cmd: Command,
    contrast_currents_cmd: Command,
    segment_low_voltage_cmd: Command,
    second_precharge_period_cmd: Command,
    pub(crate) initial_backlight: u8,
    pub(crate) initial_contrast: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_fosc_divset_cmd: Command::SetClockFoscDivset(15, 1),
            phase_lengths_cmd: Command::SetPhaseLengths(5, 3),
            com_deselect_voltage_cmd: Command::SetComDeselectVoltage(0x05),
            precharge_voltage_cmd: Command::SetPreChargeVoltage(0x17),
            contrast_currents_cmd: Command::SetContrastCurrents(0xC8, 0x80, 0xC8),
            segment_low_voltage_cmd: Command::SetSegmentLowVoltage(true),
            second_precharge_period_cmd: Command::SetSecondPrechargePeriod(1),
            initial_backlight: 100,
            initial_contrast: 100,
        }
    }
}

impl Config {
    /// Create a new configuration with the default register values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend this `Config` to explicitly configure the display clock frequency and divider. See
    /// `Command::SetClockFoscDivset`.
    pub fn clock_fosc_divset(self, fosc: u8, divset: u8) -> Self {
        Self {
            clock_fosc_divset_cmd: Command::SetClockFoscDivset(fosc, divset),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure OLED drive phase lengths. See
    /// `Command::SetPhaseLengths`.
    pub fn phase_lengths(self, reset: u8, first_precharge: u8) -> Self {
        Self {
            phase_lengths_cmd: Command::SetPhaseLengths(reset, first_precharge),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure OLED drive COM deselect voltage. See
    /// `Command::SetComDeselectVoltage`.
    pub fn com_deselect_voltage(self, voltage: u8) -> Self {
        Self {
            com_deselect_voltage_cmd: Command::SetComDeselectVoltage(voltage),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure OLED drive precharge voltage. See
    /// `Command::SetPreChargeVoltage`.
    pub fn precharge_voltage(self, voltage: u8) -> Self {
        Self {
            precharge_voltage_cmd: Command::SetPreChargeVoltage(voltage),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the per-channel contrast currents. See
    /// `Command::SetContrastCurrents`.
    pub fn contrast_currents(self, a: u8, b: u8, c: u8) -> Self {
        Self {
            contrast_currents_cmd: Command::SetContrastCurrents(a, b, c),
            ..self
        }
    }

    /// Extend this `Config` to select the external or internal segment low voltage. See
    /// `Command::SetSegmentLowVoltage`.
    pub fn external_vsl(self, external: bool) -> Self {
        Self {
            segment_low_voltage_cmd: Command::SetSegmentLowVoltage(external),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure OLED drive second precharge period length. See
    /// `Command::SetSecondPrechargePeriod`.
    pub fn second_precharge_period(self, period: u8) -> Self {
        Self {
            second_precharge_period_cmd: Command::SetSecondPrechargePeriod(period),
            ..self
        }
    }

    /// The backlight level set at the end of `Display::init`, in percent. Values above 100 are
    /// clamped.
    pub fn initial_backlight(self, percent: u8) -> Self {
        Self {
            initial_backlight: percent.min(100),
            ..self
        }
    }

    /// The contrast level the display starts at, in percent. Values above 100 are clamped.
    pub fn initial_contrast(self, percent: u8) -> Self {
        Self {
            initial_contrast: percent.min(100),
            ..self
        }
    }

    /// Transmit the oscillator configuration.
    pub(crate) fn send_clock<DI>(&self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: interface::DisplayInterface,
    {
        self.clock_fosc_divset_cmd.send(iface)
    }

    /// Transmit the drive timing and voltage configuration.
    pub(crate) fn send_drive<DI>(&self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: interface::DisplayInterface,
    {
        self.phase_lengths_cmd.send(iface)?;
        self.com_deselect_voltage_cmd.send(iface)?;
        self.precharge_voltage_cmd.send(iface)
    }

    /// Transmit the contrast and segment voltage configuration.
    pub(crate) fn send_contrast<DI>(&self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: interface::DisplayInterface,
    {
        self.contrast_currents_cmd.send(iface)?;
        Command::SetMasterContrast(master_contrast(self.initial_contrast)).send(iface)?;
        self.segment_low_voltage_cmd.send(iface)?;
        self.second_precharge_period_cmd.send(iface)
    }
}

/// Map a contrast percentage onto the 0-15 range of the master contrast register.
pub(crate) fn master_contrast(percent: u8) -> u8 {
    (u16::from(percent.min(100)) * 15 / 100) as u8
}
