//! The error type returned by driver operations.

use core::fmt;

use crate::display::region::Area;

/// Errors that can occur while driving the display. `E` is the error type of the
/// `DisplayInterface` the display is connected through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// The transport failed. The operation was abandoned part way through, and the bus session
    /// it held has been released.
    Interface(E),
    /// The requested area does not lie within the current display area. Nothing was sent.
    InvalidRegion(Area),
    /// A command argument is outside the range accepted by its register. Nothing was sent for
    /// that command.
    OutOfRange,
    /// The operation is not supported by this controller driver.
    NotSupported,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Interface(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "display interface error: {:?}", e),
            Error::InvalidRegion(area) => write!(
                f,
                "region {}x{} at ({}, {}) is outside the display",
                area.width, area.height, area.x, area.y
            ),
            Error::OutOfRange => write!(f, "command argument out of range"),
            Error::NotSupported => write!(f, "operation not supported"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}
