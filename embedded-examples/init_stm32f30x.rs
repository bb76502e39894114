//! Full example code for setting up an SSD1351 display. This runs on an STM32F303RE, using a
//! 128x128 RGB OLED module connected to SPI1, PA8 for D/C, PA9 for /RESET, and PA10 for C/S.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate cortex_m;
extern crate embedded_hal as hal_api;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;
extern crate panic_abort;
extern crate ssd1351;

use cortex_m::asm;
use cortex_m_rt::ExceptionFrame;
use hal::prelude::*;
use hal::spi;
use ssd1351 as oled;

entry!(main);

exception!(*, default_handler);
exception!(HardFault, hard_fault);

fn hard_fault(_ef: &ExceptionFrame) -> ! {
    asm::bkpt();
    loop {}
}

fn default_handler(_irqn: i16) {
    loop {}
}

fn main() -> ! {
    // Get peripherals and set up RCC.
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let mut delay = hal::delay::Delay::new(cp.SYST, clocks);

    // Get GPIO A where the display is connected.
    let mut gpioa = dp.GPIOA.split(&mut rcc.ahb);

    // Set up SPI1, which is Alternate Function 5 for GPIOs PA5,6,7. The SSD1351 samples on the
    // rising edge with the clock idling high.
    let disp_sck = gpioa.pa5.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let disp_miso = gpioa.pa6.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let disp_mosi = gpioa.pa7.into_af5(&mut gpioa.moder, &mut gpioa.afrl);

    let disp_spi = spi::Spi::spi1(
        dp.SPI1,
        (disp_sck, disp_miso, disp_mosi),
        hal_api::spi::Mode {
            polarity: hal_api::spi::Polarity::IdleHigh,
            phase: hal_api::spi::Phase::CaptureOnSecondTransition,
        },
        8.mhz(),
        clocks,
        &mut rcc.apb2,
    );

    // PA8 will be the D/C push-pull output for the 4th wire.
    let disp_dc = gpioa
        .pa8
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    // PA9 is the display's /RESET pin, pulsed by the driver during init through the board.
    let disp_rst = gpioa
        .pa9
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    // PA10 is the display's C/S pin, asserted only while the driver holds the bus.
    let disp_cs = gpioa
        .pa10
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    let mut disp = oled::Display::new(
        oled::SpiInterface::new(disp_spi, disp_dc, disp_cs),
        oled::GpioBoard::new(disp_rst),
        oled::DisplaySize::Display128x128,
    );

    // Reset and initialize the display; this leaves it on and blanked.
    disp.init(&mut delay).unwrap();

    // Draw a white frame with a red square in the middle.
    let white = oled::Rgb::WHITE;
    disp.fill_area(oled::Area::new(0, 0, 128, 1), white).unwrap();
    disp.fill_area(oled::Area::new(0, 127, 128, 1), white).unwrap();
    disp.fill_area(oled::Area::new(0, 0, 1, 128), white).unwrap();
    disp.fill_area(oled::Area::new(127, 0, 1, 128), white).unwrap();
    disp.fill_area(oled::Area::new(48, 48, 32, 32), oled::Rgb(0xFF, 0, 0))
        .unwrap();

    loop {
        asm::wfi();
    }
}
