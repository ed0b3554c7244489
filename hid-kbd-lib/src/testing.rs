use crate::transport::ReportTransport;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Refused;

/// Records everything the accumulator hands over.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    pub(crate) descriptors: Vec<&'static [u8]>,
    pub(crate) sent: Vec<(u8, Vec<u8>)>,
    pub(crate) refuse_sends: bool,
    pub(crate) refuse_register: bool,
}

impl RecordingTransport {
    pub(crate) fn last_payload(&self) -> Option<&[u8]> {
        self.sent.last().map(|(_, payload)| payload.as_slice())
    }
}

impl ReportTransport for RecordingTransport {
    type Error = Refused;

    fn register_descriptor(&mut self, descriptor: &'static [u8]) -> Result<(), Self::Error> {
        if self.refuse_register {
            return Err(Refused);
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    fn send(&mut self, report_id: u8, payload: &[u8]) -> Result<(), Self::Error> {
        if self.refuse_sends {
            return Err(Refused);
        }
        self.sent.push((report_id, payload.to_vec()));
        Ok(())
    }
}
