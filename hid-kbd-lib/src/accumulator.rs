use usbd_hid::descriptor::KeyboardUsage;

use crate::descriptor::{KEYBOARD_REPORT_DESCRIPTOR, KEYBOARD_REPORT_ID};
use crate::report::{is_modifier, modifier_mask, KeyReport, NO_EVENT};
use crate::transport::ReportTransport;

/// Current keyboard state for one HID interface, bound to the transport that
/// carries it.
///
/// Not synchronized. If presses come from an interrupt while the main loop
/// sends, wrap it in [`crate::shared::SharedAccumulator`] or otherwise hold
/// interrupts off around the read-modify-write.
pub struct KeyStateAccumulator<T> {
    report: KeyReport,
    transport: T,
}

impl<T: ReportTransport> KeyStateAccumulator<T> {
    /// Registers the keyboard descriptor with `transport` and starts from an
    /// empty report.
    ///
    /// # Errors
    /// The transport refused the descriptor.
    pub fn new(mut transport: T) -> Result<Self, T::Error> {
        transport.register_descriptor(&KEYBOARD_REPORT_DESCRIPTOR)?;
        let mut acc = Self {
            report: KeyReport::empty(),
            transport,
        };
        acc.release_all();
        Ok(acc)
    }

    /// Adds `keycode` to the report.
    ///
    /// Modifiers set their bit. Other keys take the first free slot, unless
    /// already held. With all 6 slots taken the key is dropped.
    pub fn press(&mut self, keycode: u8) {
        if is_modifier(keycode) {
            self.report.modifiers |= modifier_mask(keycode);
            return;
        }
        if self.report.keys.contains(&keycode) {
            return;
        }
        if let Some(slot) = self.report.keys.iter_mut().find(|k| **k == NO_EVENT) {
            *slot = keycode;
            log::trace!("press {keycode:#04x}");
        } else {
            log::debug!("rollover, dropping {keycode:#04x}");
        }
    }

    /// Removes `keycode` from the report, a no-op if it isn't held.
    pub fn release(&mut self, keycode: u8) {
        if is_modifier(keycode) {
            self.report.modifiers &= !modifier_mask(keycode);
            return;
        }
        // Every matching slot, even though press never stores duplicates
        for slot in &mut self.report.keys {
            if *slot == keycode {
                *slot = NO_EVENT;
            }
        }
    }

    #[inline]
    pub fn set_pressed(&mut self, keycode: u8, pressed: bool) {
        if pressed {
            self.press(keycode);
        } else {
            self.release(keycode);
        }
    }

    #[inline]
    pub fn press_usage(&mut self, usage: KeyboardUsage) {
        self.press(usage as u8);
    }

    #[inline]
    pub fn release_usage(&mut self, usage: KeyboardUsage) {
        self.release(usage as u8);
    }

    pub fn release_all(&mut self) {
        self.report.keys = [NO_EVENT; crate::report::KEY_SLOTS];
        self.report.modifiers = 0;
    }

    /// Sends the current state under [`KEYBOARD_REPORT_ID`]. The report is
    /// left untouched whatever the outcome.
    ///
    /// # Errors
    /// Whatever the transport reports, passed through as is.
    pub fn send_report(&mut self) -> Result<(), T::Error> {
        let bytes = self.report.to_bytes();
        self.transport.send(KEYBOARD_REPORT_ID, &bytes)
    }

    #[inline]
    #[must_use]
    pub fn report(&self) -> &KeyReport {
        &self.report
    }

    #[inline]
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[inline]
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    #[must_use]
    pub fn into_transport(self) -> T {
        self.transport
    }
}
