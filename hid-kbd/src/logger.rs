use log::{Level, Log, Metadata, Record};
use rtt_target::rprintln;

#[cfg(debug_assertions)]
const LEVEL: Level = Level::Trace;
#[cfg(not(debug_assertions))]
const LEVEL: Level = Level::Info;

struct RttLogger;

static LOGGER: RttLogger = RttLogger;

impl Log for RttLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= LEVEL
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            rprintln!("{:<5} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs the RTT logger.
///
/// # Safety
/// Must run once, on a single core, before anything logs. thumbv6m has no
/// compare-and-swap so the racy setters are the only ones available.
pub unsafe fn init() {
    rtt_target::rtt_init_print!();
    if log::set_logger_racy(&LOGGER).is_ok() {
        log::set_max_level_racy(LEVEL.to_level_filter());
    }
}
