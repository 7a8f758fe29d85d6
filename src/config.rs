//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and panel geometry
//! live here so they can be tuned in one place.

// Panel

/// LCD width in landscape orientation (pixels).
pub const PANEL_WIDTH: u16 = 480;

/// LCD height in landscape orientation (pixels).
pub const PANEL_HEIGHT: u16 = 320;

/// Maximum number of buttons that can be active on one screen.
pub const MAX_BUTTONS: usize = 10;

// Touch controller

/// Raw touch coordinates span `0..TOUCH_RAW_SPAN` on both axes (12-bit).
pub const TOUCH_RAW_SPAN: u32 = 4096;

/// Touch events drained per poll of the main loop.
pub const TOUCH_BATCH: usize = 3;

/// maXTouch T9 status value that triggers hit-testing (finger released).
pub const TOUCH_STATUS_RELEASE: u8 = 0x20;

/// maXTouch 7-bit I²C address (Xplained Pro default).
pub const MXT_I2C_ADDRESS: u8 = 0x4A;

/// Time the maXTouch needs after a soft reset (ms).
pub const MXT_RESET_TIME_MS: u32 = 200;

/// T7 power configuration written at start-up: idle / active acquisition
/// intervals, acquisition-to-idle timeout, measurement config.
pub const MXT_T7_CONFIG: [u8; 4] = [0x20, 0x10, 0x4b, 0x84];

// Timing

/// Main loop idle wait between polls when nothing is pending (ms).
pub const POLL_INTERVAL_MS: u64 = 10;

/// Countdown tick period (seconds). One tick removes one minute from the
/// displayed remaining time.
pub const TICK_PERIOD_SECS: u64 = 1;

/// Debounce applied to the door sensor and release button edges (ms).
pub const EDGE_DEBOUNCE_MS: u64 = 20;

// Diagnostics

/// Baud rate of the diagnostic UART.
pub const DIAG_BAUD_RATE: u32 = 57_600;

/// Capacity of one formatted touch log line (`"X:%3d Y:%3d \n"`).
pub const DIAG_LINE_CAPACITY: usize = 24;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the concrete `embassy_nrf::peripherals::*`
// are bound in `main.rs`.  Adjust for the appliance PCB.
//
//   Door sensor      → P0.11 (active-low, pull-up)
//   Release button   → P0.12 (active-low, pull-up)
//   Door LED         → P0.13 (active-low)
//   Touch SDA / SCL  → P0.26 / P0.27
//   Touch CHG        → P0.28 (low = message pending)
//   LCD SCK / MOSI   → P1.15 / P1.13
//   LCD MISO         → P1.14
//   LCD CS / DC / RST→ P1.12 / P1.11 / P1.10
//   Diagnostic TX    → P0.06
