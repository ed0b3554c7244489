use hid_kbd_lib::{KeyStateAccumulator, ReportTransport};
use rp2040_hal::fugit::MicrosDurationU64;
use rp2040_hal::timer::Instant;
use usbd_hid::descriptor::KeyboardUsage;

/// Time between two steps, long enough for the host to see each report.
const STEP_INTERVAL: MicrosDurationU64 = MicrosDurationU64::millis(20);
/// Grace period after enumeration before typing starts.
const START_DELAY: MicrosDurationU64 = MicrosDurationU64::millis(2_000);

#[derive(Debug, Copy, Clone)]
pub struct KeyStep {
    pub keycode: u8,
    pub pressed: bool,
}

const fn down(usage: KeyboardUsage) -> KeyStep {
    KeyStep {
        keycode: usage as u8,
        pressed: true,
    }
}

const fn up(usage: KeyboardUsage) -> KeyStep {
    KeyStep {
        keycode: usage as u8,
        pressed: false,
    }
}

/// "Hello" then enter.
pub const GREETING: &[KeyStep] = &[
    down(KeyboardUsage::KeyboardLeftShift),
    down(KeyboardUsage::KeyboardHh),
    up(KeyboardUsage::KeyboardHh),
    up(KeyboardUsage::KeyboardLeftShift),
    down(KeyboardUsage::KeyboardEe),
    up(KeyboardUsage::KeyboardEe),
    down(KeyboardUsage::KeyboardLl),
    up(KeyboardUsage::KeyboardLl),
    down(KeyboardUsage::KeyboardLl),
    up(KeyboardUsage::KeyboardLl),
    down(KeyboardUsage::KeyboardOo),
    up(KeyboardUsage::KeyboardOo),
    down(KeyboardUsage::KeyboardEnter),
    up(KeyboardUsage::KeyboardEnter),
];

/// Plays a script once, one step per report.
pub struct Typist {
    script: &'static [KeyStep],
    pos: usize,
    next_step_at: Option<Instant>,
}

impl Typist {
    pub const fn new(script: &'static [KeyStep]) -> Self {
        Self {
            script,
            pos: 0,
            next_step_at: None,
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.pos >= self.script.len()
    }

    /// Applies the next step if it is due and sends the resulting report.
    pub fn tick<T: ReportTransport>(
        &mut self,
        now: Instant,
        keyboard: &mut KeyStateAccumulator<T>,
    ) -> Result<(), T::Error> {
        let Some(due) = self.next_step_at else {
            self.next_step_at = Some(now + START_DELAY);
            return Ok(());
        };
        if now < due {
            return Ok(());
        }
        let Some(step) = self.script.get(self.pos) else {
            return Ok(());
        };
        keyboard.set_pressed(step.keycode, step.pressed);
        keyboard.send_report()?;
        self.pos += 1;
        self.next_step_at = Some(now + STEP_INTERVAL);
        Ok(())
    }
}
