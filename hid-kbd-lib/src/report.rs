use usbd_hid::descriptor::KeyboardReport;

/// Bytes on the wire per report, report ID excluded.
pub const REPORT_LEN: usize = 8;
pub const KEY_SLOTS: usize = 6;
/// HID "no event", marks an empty key slot.
pub const NO_EVENT: u8 = 0x00;
/// Keycodes from here up only ever touch the modifier byte.
pub const MODIFIER_RANGE_START: u8 = 0xE0;
pub const MODIFIER_RANGE_END: u8 = 0xE7;

#[inline]
#[must_use]
pub const fn is_modifier(keycode: u8) -> bool {
    keycode >= MODIFIER_RANGE_START
}

/// Bit in the modifier byte for a keycode at or above `0xE0`.
///
/// The bit index is the low nibble of the keycode, anything that would land
/// past bit 7 (`0xE8..=0xEF`, `0xF8..=0xFF`) yields an empty mask.
#[inline]
#[must_use]
pub const fn modifier_mask(keycode: u8) -> u8 {
    match 1u8.checked_shl((keycode & 0x0F) as u32) {
        Some(mask) => mask,
        None => 0,
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Modifier {
    LeftControl = 0xE0,
    LeftShift = 0xE1,
    LeftAlt = 0xE2,
    LeftGui = 0xE3,
    RightControl = 0xE4,
    RightShift = 0xE5,
    RightAlt = 0xE6,
    RightGui = 0xE7,
}

impl Modifier {
    #[inline]
    #[must_use]
    pub const fn keycode(self) -> u8 {
        self as u8
    }

    #[inline]
    #[must_use]
    pub const fn mask(self) -> u8 {
        modifier_mask(self as u8)
    }
}

/// Keyboard input report, laid out as `[modifiers][reserved][key0..key5]`.
///
/// Key slots keep press order among held keys, a released key leaves a hole
/// that the next press fills.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyReport {
    pub(crate) modifiers: u8,
    reserved: u8,
    pub(crate) keys: [u8; KEY_SLOTS],
}

impl KeyReport {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            modifiers: 0,
            reserved: 0,
            keys: [NO_EVENT; KEY_SLOTS],
        }
    }

    #[inline]
    #[must_use]
    pub const fn modifiers(&self) -> u8 {
        self.modifiers
    }

    #[inline]
    #[must_use]
    pub const fn keys(&self) -> &[u8; KEY_SLOTS] {
        &self.keys
    }

    #[inline]
    #[must_use]
    pub fn is_modifier_held(&self, modifier: Modifier) -> bool {
        self.modifiers & modifier.mask() != 0
    }

    /// Whether `keycode` is currently part of the report, modifiers included.
    #[must_use]
    pub fn is_pressed(&self, keycode: u8) -> bool {
        if is_modifier(keycode) {
            let mask = modifier_mask(keycode);
            mask != 0 && self.modifiers & mask == mask
        } else {
            keycode != NO_EVENT && self.keys.contains(&keycode)
        }
    }

    /// Occupied key slots, modifiers not counted.
    #[must_use]
    pub fn pressed_count(&self) -> usize {
        self.keys.iter().filter(|k| **k != NO_EVENT).count()
    }

    #[must_use]
    pub const fn to_bytes(&self) -> [u8; REPORT_LEN] {
        let k = &self.keys;
        [
            self.modifiers,
            self.reserved,
            k[0],
            k[1],
            k[2],
            k[3],
            k[4],
            k[5],
        ]
    }
}

impl Default for KeyReport {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<KeyReport> for KeyboardReport {
    fn from(value: KeyReport) -> Self {
        KeyboardReport {
            modifier: value.modifiers,
            reserved: 0,
            leds: 0,
            keycodes: value.keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_all_zero() {
        assert_eq!([0u8; REPORT_LEN], KeyReport::empty().to_bytes());
        assert_eq!(KeyReport::empty(), KeyReport::default());
        assert_eq!(0, KeyReport::empty().pressed_count());
    }

    #[test]
    fn wire_layout() {
        let report = KeyReport {
            modifiers: 0b0000_0010,
            reserved: 0,
            keys: [0x04, 0, 0x05, 0, 0, 0x28],
        };
        assert_eq!(
            [0x02, 0x00, 0x04, 0x00, 0x05, 0x00, 0x00, 0x28],
            report.to_bytes()
        );
        assert_eq!(3, report.pressed_count());
    }

    #[test]
    fn modifier_masks() {
        assert_eq!(0b0000_0001, Modifier::LeftControl.mask());
        assert_eq!(0b0000_0010, Modifier::LeftShift.mask());
        assert_eq!(0b0001_0000, Modifier::RightControl.mask());
        assert_eq!(0b1000_0000, Modifier::RightGui.mask());
        assert_eq!(MODIFIER_RANGE_END, Modifier::RightGui.keycode());
    }

    #[test]
    fn modifier_mask_out_of_range_nibbles() {
        for code in 0xE8..=0xEF {
            assert_eq!(0, modifier_mask(code), "{code:#04x}");
        }
        // Low nibble wraps back onto the real modifier bits
        assert_eq!(Modifier::LeftShift.mask(), modifier_mask(0xF1));
        assert_eq!(0, modifier_mask(0xFF));
    }

    #[test]
    fn pressed_queries() {
        let report = KeyReport {
            modifiers: Modifier::LeftAlt.mask(),
            reserved: 0,
            keys: [0, 0x1D, 0, 0, 0, 0],
        };
        assert!(report.is_pressed(0x1D));
        assert!(report.is_pressed(Modifier::LeftAlt.keycode()));
        assert!(report.is_modifier_held(Modifier::LeftAlt));
        assert!(!report.is_modifier_held(Modifier::RightAlt));
        assert!(!report.is_pressed(0x04));
        assert!(!report.is_pressed(NO_EVENT));
        assert!(!report.is_pressed(0xE8));
    }

    #[test]
    fn into_usbd_hid_report() {
        let report = KeyReport {
            modifiers: 0x22,
            reserved: 0,
            keys: [0x04, 0x05, 0x06, 0, 0, 0],
        };
        let hid: KeyboardReport = report.into();
        assert_eq!(0x22, hid.modifier);
        assert_eq!(0, hid.reserved);
        assert_eq!(0, hid.leds);
        assert_eq!([0x04, 0x05, 0x06, 0, 0, 0], hid.keycodes);
    }
}
