use crate::report::{KEY_SLOTS, MODIFIER_RANGE_END, MODIFIER_RANGE_START};

pub const KEYBOARD_REPORT_ID: u8 = 2;

/// Highest keyboard usage declared for the key array (Keyboard Application).
const KEY_USAGE_MAX: u8 = 0x73;

/// Keyboard collection under report ID 2: 8 modifier bits, one padding byte,
/// then 6 array slots.
pub const KEYBOARD_REPORT_DESCRIPTOR: [u8; 47] = [
    0x05, 0x01,                     // Usage Page (Generic Desktop)
    0x09, 0x06,                     // Usage (Keyboard)
    0xa1, 0x01,                     // Collection (Application)
    0x85, KEYBOARD_REPORT_ID,       //  Report ID (2)
    0x05, 0x07,                     //  Usage Page (Keyboard)
    0x19, MODIFIER_RANGE_START,     //  Usage Minimum (Left Control)
    0x29, MODIFIER_RANGE_END,       //  Usage Maximum (Right GUI)
    0x15, 0x00,                     //  Logical Minimum (0)
    0x25, 0x01,                     //  Logical Maximum (1)
    0x75, 0x01,                     //  Report Size (1)
    0x95, 0x08,                     //  Report Count (8)
    0x81, 0x02,                     //  Input (Data,Var,Abs)
    0x95, 0x01,                     //  Report Count (1)
    0x75, 0x08,                     //  Report Size (8)
    0x81, 0x03,                     //  Input (Cnst,Var,Abs)
    0x95, KEY_SLOTS as u8,          //  Report Count (6)
    0x75, 0x08,                     //  Report Size (8)
    0x15, 0x00,                     //  Logical Minimum (0)
    0x25, KEY_USAGE_MAX,            //  Logical Maximum (115)
    0x05, 0x07,                     //  Usage Page (Keyboard)
    0x19, 0x00,                     //  Usage Minimum (No event)
    0x29, KEY_USAGE_MAX,            //  Usage Maximum (Keyboard Application)
    0x81, 0x00,                     //  Input (Data,Arr,Abs)
    0xc0,                           // End Collection
];
