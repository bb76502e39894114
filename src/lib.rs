//! Driver library for the Solomon Systech SSD1351 RGB OLED display controller.
//!
//! The display is driven over 4-wire SPI in 65k color mode. Every operation brackets its
//! transfers in a bus session, so the display can share its SPI bus with other devices.

#![cfg_attr(not(any(test, feature = "std")), no_std)]


pub mod board;
pub mod capability;
pub mod color;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod interface;

// Re-exports for primary API.
pub use board::{Board, GpioBoard, NoBacklight, PwmBacklight};
pub use capability::{
    DisplayDriver, HardwareClear, HardwareControl, HardwareFill, HardwareStreamRead,
    HardwareStreamWrite, PixelSink,
};
pub use color::{NativeColor, Rgb};
pub use command::consts;
pub use config::Config;
pub use display::control::{ControlRequest, Orientation, PowerMode};
pub use display::region::{Area, WriteStream};
pub use display::{Display, DisplaySize, DisplayState};
pub use error::Error;
pub use interface::spi::SpiInterface;
pub use interface::DisplayInterface;
