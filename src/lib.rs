//! Washing-machine front panel.
//!
//! Everything that decides what the panel shows lives here and builds on
//! the host: the screen state machine, hit-testing, rendering, the event
//! flags and the maXTouch driver. The embedded binary (`main.rs`, feature
//! `embedded`) only binds these to nRF52840 peripherals.
//!
//! Usage: `cargo test` runs the whole suite on the host.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod catalog;
pub mod config;
pub mod diag;
pub mod display;
pub mod error;
pub mod events;
pub mod geometry;
pub mod touch;
pub mod ui;

pub use error::{Error, TouchError};
