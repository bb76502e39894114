//! Board-level collaborators of the driver: the reset line, the optional backlight, and the
//! bring-up hooks run around initialization.
//!
//! Failures of these pins are not reported to the driver. A board which can observe them (like
//! `GpioBoard`) logs them.

use embedded_hal::digital::v2::OutputPin;
use embedded_hal::PwmPin;

/// Board support for a display module.
pub trait Board {
    /// Called first thing in `Display::init`, before the reset pulse.
    fn init_board(&mut self) {}

    /// Called at the end of `Display::init`, after the bus has been released.
    fn post_init_board(&mut self) {}

    /// Drive the reset line. `active` asserts reset.
    fn set_reset_pin(&mut self, active: bool);

    /// Set the backlight level in percent, 0-100.
    fn set_backlight(&mut self, _percent: u8) {}
}

/// A backlight whose brightness can be set in percent.
pub trait Backlight {
    fn set_level(&mut self, percent: u8);
}

/// For modules without a backlight. OLED panels emit their own light, so this is the usual case.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBacklight;

impl Backlight for NoBacklight {
    fn set_level(&mut self, _percent: u8) {}
}

/// A backlight driven by a PWM channel, with 100 percent mapped to the maximum duty cycle.
pub struct PwmBacklight<P> {
    pwm: P,
}

impl<P> PwmBacklight<P>
where
    P: PwmPin<Duty = u16>,
{
    pub fn new(mut pwm: P) -> Self {
        pwm.enable();
        Self { pwm }
    }
}

impl<P> Backlight for PwmBacklight<P>
where
    P: PwmPin<Duty = u16>,
{
    fn set_level(&mut self, percent: u8) {
        let max = u32::from(self.pwm.get_max_duty());
        let duty = max * u32::from(percent.min(100)) / 100;
        self.pwm.set_duty(duty as u16);
    }
}

/// A board whose display reset line is an active-low GPIO output.
pub struct GpioBoard<RST, BL = NoBacklight> {
    reset: RST,
    backlight: BL,
}

impl<RST> GpioBoard<RST, NoBacklight>
where
    RST: OutputPin,
{
    pub fn new(reset: RST) -> Self {
        Self {
            reset,
            backlight: NoBacklight,
        }
    }
}

impl<RST, BL> GpioBoard<RST, BL>
where
    RST: OutputPin,
    BL: Backlight,
{
    /// Attach a backlight to this board.
    pub fn with_backlight<BL2: Backlight>(self, backlight: BL2) -> GpioBoard<RST, BL2> {
        GpioBoard {
            reset: self.reset,
            backlight,
        }
    }

    pub fn release(self) -> (RST, BL) {
        (self.reset, self.backlight)
    }
}

impl<RST, BL> Board for GpioBoard<RST, BL>
where
    RST: OutputPin,
    RST::Error: core::fmt::Debug,
    BL: Backlight,
{
    fn set_reset_pin(&mut self, active: bool) {
        let res = match active {
            true => self.reset.set_low(),
            false => self.reset.set_high(),
        };
        if let Err(e) = res {
            log::error!("failed to drive display reset pin: {:?}", e);
        }
    }

    fn set_backlight(&mut self, percent: u8) {
        self.backlight.set_level(percent);
    }
}
