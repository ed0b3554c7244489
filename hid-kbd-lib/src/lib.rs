//! Key state accumulator for a USB HID keyboard.
//!
//! Tracks held modifiers and up to 6 held keys, and serializes them into the
//! 8 byte report sent under report ID 2 through a [`ReportTransport`].
#![cfg_attr(not(test), no_std)]

pub mod accumulator;
pub mod descriptor;
pub mod report;
pub mod shared;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use accumulator::KeyStateAccumulator;
pub use descriptor::{KEYBOARD_REPORT_DESCRIPTOR, KEYBOARD_REPORT_ID};
pub use report::{KeyReport, Modifier};
pub use shared::SharedAccumulator;
pub use transport::ReportTransport;
