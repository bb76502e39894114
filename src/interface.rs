//! The transport between the driver and the SSD1351, and the scoped bus session every display
//! operation runs in.

use core::fmt::Debug;
use core::ops::{Deref, DerefMut};

/// A byte-oriented transport to the display controller.
///
/// `acquire_bus` and `release_bus` bracket every display operation, so a transport that shares
/// its bus with other devices can select the display (and deselect it afterwards) there. The
/// default implementations do nothing.
pub trait DisplayInterface {
    type Error: Debug;

    fn acquire_bus(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn release_bus(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error>;
    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}

/// Exclusive access to a `DisplayInterface` between `acquire_bus` and `release_bus`.
///
/// The bus is released by `release`, which reports the outcome, or otherwise when the session is
/// dropped, so that an operation abandoned with `?` half way through still gives up the bus.
pub struct BusSession<'di, DI>
where
    DI: DisplayInterface,
{
    iface: &'di mut DI,
    released: bool,
}

impl<'di, DI> BusSession<'di, DI>
where
    DI: DisplayInterface,
{
    pub fn acquire(iface: &'di mut DI) -> Result<Self, DI::Error> {
        iface.acquire_bus()?;
        Ok(Self {
            iface,
            released: false,
        })
    }

    pub fn release(mut self) -> Result<(), DI::Error> {
        self.released = true;
        self.iface.release_bus()
    }
}

impl<'di, DI> Deref for BusSession<'di, DI>
where
    DI: DisplayInterface,
{
    type Target = DI;

    fn deref(&self) -> &DI {
        self.iface
    }
}

impl<'di, DI> DerefMut for BusSession<'di, DI>
where
    DI: DisplayInterface,
{
    fn deref_mut(&mut self) -> &mut DI {
        self.iface
    }
}

impl<'di, DI> Drop for BusSession<'di, DI>
where
    DI: DisplayInterface,
{
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.iface.release_bus() {
            log::warn!("failed to release display bus: {:?}", e);
        }
    }
}

pub mod spi {
    //! The SPI interface supports the "4-wire" interface of the driver, such that each word on the
    //! SPI bus is 8 bits. The "3-wire" mode replaces the D/C GPIO with a 9th bit on each word,
    //! which seems really awkward to implement with embedded_hal SPI.

    use core::fmt::Debug;

    use embedded_hal::blocking::spi::Write;
    use embedded_hal::digital::v2::OutputPin;

    use super::DisplayInterface;

    /// Errors raised by `SpiInterface`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum InterfaceError<SpiE, PinE> {
        /// The SPI write failed.
        Spi(SpiE),
        /// Driving the D/C or C/S pin failed.
        Pin(PinE),
    }

    pub struct SpiInterface<SPI, DC, CS> {
        /// The SPI master device connected to the SSD1351.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin of the SSD1351 (the fourth
        /// "wire" of "4-wire" mode).
        dc: DC,
        /// A GPIO output pin connected to the active-low C/S (chip select) pin of the SSD1351.
        cs: CS,
    }

    impl<SPI, DC, CS> SpiInterface<SPI, DC, CS>
    where
        SPI: Write<u8>,
        DC: OutputPin,
        CS: OutputPin<Error = DC::Error>,
    {
        /// Create a new SPI interface to communicate with the display driver. `spi` is the SPI
        /// master device, `dc` is the GPIO output pin connected to the D/C pin of the SSD1351,
        /// and `cs` is the GPIO output pin connected to its C/S pin. The display is selected only
        /// while a bus session is held.
        pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
            Self { spi, dc, cs }
        }

        /// Give back the SPI device and pins.
        pub fn release(self) -> (SPI, DC, CS) {
            (self.spi, self.dc, self.cs)
        }
    }

    impl<SPI, DC, CS> DisplayInterface for SpiInterface<SPI, DC, CS>
    where
        SPI: Write<u8>,
        SPI::Error: Debug,
        DC: OutputPin,
        DC::Error: Debug,
        CS: OutputPin<Error = DC::Error>,
    {
        type Error = InterfaceError<SPI::Error, DC::Error>;

        fn acquire_bus(&mut self) -> Result<(), Self::Error> {
            self.cs.set_low().map_err(InterfaceError::Pin)
        }

        fn release_bus(&mut self) -> Result<(), Self::Error> {
            self.cs.set_high().map_err(InterfaceError::Pin)
        }

        fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
            self.dc.set_low().map_err(InterfaceError::Pin)?;
            self.spi.write(&[cmd]).map_err(InterfaceError::Spi)?;
            self.dc.set_high().map_err(InterfaceError::Pin)
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.dc.set_high().map_err(InterfaceError::Pin)?;
            self.spi.write(buf).map_err(InterfaceError::Spi)
        }
    }
}
