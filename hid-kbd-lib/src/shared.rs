use core::cell::RefCell;

use critical_section::Mutex;

use crate::accumulator::KeyStateAccumulator;

/// Slot for an accumulator that is touched from more than one execution
/// context, e.g. an interrupt pressing keys while the main loop sends.
///
/// Every access runs inside a critical section. Meant to live in a `static`.
pub struct SharedAccumulator<T> {
    inner: Mutex<RefCell<Option<KeyStateAccumulator<T>>>>,
}

impl<T> SharedAccumulator<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Puts `acc` in the slot, returns false and drops `acc` if one is
    /// already installed.
    pub fn install(&self, acc: KeyStateAccumulator<T>) -> bool {
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow_ref_mut(cs);
            if slot.is_some() {
                return false;
            }
            *slot = Some(acc);
            true
        })
    }

    /// Runs `func` on the installed accumulator with interrupts held off.
    /// `None` if nothing was installed yet.
    pub fn with<R, F: FnOnce(&mut KeyStateAccumulator<T>) -> R>(&self, func: F) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(func))
    }
}
