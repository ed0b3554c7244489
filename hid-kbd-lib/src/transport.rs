/// Something that can carry keyboard reports to a host.
///
/// Registration happens once, before any report is sent. How a report is
/// framed on the bus (report ID prefix, endpoint choice, retries) is up to
/// the implementation.
pub trait ReportTransport {
    type Error: core::fmt::Debug;

    /// Hands the report descriptor to the underlying HID interface.
    ///
    /// # Errors
    /// Implementation specific, typically when the interface was already set up.
    fn register_descriptor(&mut self, descriptor: &'static [u8]) -> Result<(), Self::Error>;

    /// Transmits `payload` tagged with `report_id`.
    ///
    /// # Errors
    /// Implementation specific, the report was not handed off to the host.
    fn send(&mut self, report_id: u8, payload: &[u8]) -> Result<(), Self::Error>;
}

impl<T: ReportTransport + ?Sized> ReportTransport for &mut T {
    type Error = T::Error;

    #[inline]
    fn register_descriptor(&mut self, descriptor: &'static [u8]) -> Result<(), Self::Error> {
        (**self).register_descriptor(descriptor)
    }

    #[inline]
    fn send(&mut self, report_id: u8, payload: &[u8]) -> Result<(), Self::Error> {
        (**self).send(report_id, payload)
    }
}
