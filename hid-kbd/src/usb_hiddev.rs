use core::fmt::{Display, Formatter};

use hid_kbd_lib::report::REPORT_LEN;
use hid_kbd_lib::ReportTransport;
use rp2040_hal::usb::UsbBus;
use usb_device::bus::UsbBusAllocator;
use usb_device::device::{StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid};
use usb_device::{LangID, UsbError};
use usbd_hid::hid_class::HIDClass;

const VID_PID: UsbVidPid = UsbVidPid(0x16c0, 0x27db);
const MANUFACTURER: &str = "hid-kbd";
const PRODUCT: &str = "HID Keyboard";
const SERIAL_NUMBER: &str = "1";
const POLL_MS: u8 = 1;
/// Report ID byte followed by the report itself.
const FRAME_LEN: usize = REPORT_LEN + 1;
/// How many times a full endpoint gets polled before a send gives up.
const MAX_SEND_ATTEMPTS: u32 = 10_000;

#[derive(Debug)]
pub enum TransportError {
    Usb(UsbError),
    InvalidStrings,
    AlreadyRegistered,
    NotRegistered,
    PayloadTooLarge(usize),
}

impl From<UsbError> for TransportError {
    fn from(value: UsbError) -> Self {
        Self::Usb(value)
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            TransportError::Usb(usb_error) => write!(f, "Usb error: {usb_error:?}"),
            TransportError::InvalidStrings => f.write_str("Bad usb string descriptors"),
            TransportError::AlreadyRegistered => f.write_str("Hid descriptor already registered"),
            TransportError::NotRegistered => f.write_str("No hid descriptor registered"),
            TransportError::PayloadTooLarge(len) => {
                write!(f, "Report of {len} bytes doesn't fit a {FRAME_LEN} byte frame")
            }
        }
    }
}

/// HID interface plus the usb device it is exposed through. Neither exists
/// until a descriptor is registered, the class has to be allocated before the
/// device is built.
pub struct UsbHidTransport<'a> {
    allocator: &'a UsbBusAllocator<UsbBus>,
    hid: Option<HIDClass<'a, UsbBus>>,
    dev: Option<UsbDevice<'a, UsbBus>>,
}

impl<'a> UsbHidTransport<'a> {
    pub fn new(allocator: &'a UsbBusAllocator<UsbBus>) -> Self {
        Self {
            allocator,
            hid: None,
            dev: None,
        }
    }

    #[inline]
    pub fn poll(&mut self) -> bool {
        if let (Some(dev), Some(hid)) = (self.dev.as_mut(), self.hid.as_mut()) {
            dev.poll(&mut [hid])
        } else {
            false
        }
    }

    #[inline]
    pub fn is_configured(&self) -> bool {
        self.dev
            .as_ref()
            .is_some_and(|dev| dev.state() == UsbDeviceState::Configured)
    }
}

impl ReportTransport for UsbHidTransport<'_> {
    type Error = TransportError;

    fn register_descriptor(&mut self, descriptor: &'static [u8]) -> Result<(), Self::Error> {
        if self.hid.is_some() {
            return Err(TransportError::AlreadyRegistered);
        }
        let hid = HIDClass::new_ep_in(self.allocator, descriptor, POLL_MS);
        // Ordering here is important, class before device.
        self.hid = Some(hid);
        let dev = UsbDeviceBuilder::new(self.allocator, VID_PID)
            .strings(&[StringDescriptors::new(LangID::EN)
                .manufacturer(MANUFACTURER)
                .product(PRODUCT)
                .serial_number(SERIAL_NUMBER)])
            .map_err(|_| TransportError::InvalidStrings)?
            .device_class(0)
            .build();
        self.dev = Some(dev);
        log::info!("Registered hid descriptor, {} bytes", descriptor.len());
        Ok(())
    }

    fn send(&mut self, report_id: u8, payload: &[u8]) -> Result<(), Self::Error> {
        let len = payload.len() + 1;
        if len > FRAME_LEN {
            return Err(TransportError::PayloadTooLarge(payload.len()));
        }
        let mut frame = [0u8; FRAME_LEN];
        frame[0] = report_id;
        frame[1..len].copy_from_slice(payload);
        for _ in 0..MAX_SEND_ATTEMPTS {
            let hid = self.hid.as_ref().ok_or(TransportError::NotRegistered)?;
            match hid.push_raw_input(&frame[..len]) {
                Ok(_) => return Ok(()),
                Err(UsbError::WouldBlock) => {
                    self.poll();
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(TransportError::Usb(UsbError::WouldBlock))
    }
}
