//! Unified error type for washpanel.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Touch
    /// The touch controller failed.
    Touch(TouchError),

    // Display
    /// SPI transfer to the LCD failed.
    Display,

    // Diagnostics
    /// Diagnostic UART write failed.
    Uart,

    // Start-up
    /// A peripheral could not be brought up.
    Init,
}

/// Errors reported by the touch controller driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// I²C transaction failed.
    Bus,
    /// The controller does not expose the object type we need.
    ObjectNotFound(u8),
    /// The message processor object reports a message larger than our buffer.
    MessageTooLong,
    /// The pending message did not come from the touchscreen object.
    NoTouchEvent,
}

// Convenience conversions

impl From<TouchError> for Error {
    fn from(e: TouchError) -> Self {
        Error::Touch(e)
    }
}
