#![no_std]
#![no_main]

mod demo;
mod logger;
mod usb_hiddev;

use hid_kbd_lib::KeyStateAccumulator;
// The macro for our start-up function
use liatris::entry;

// A shorter alias for the Peripheral Access Crate, which provides low-level
// register access
use liatris::hal::pac;

// A shorter alias for the Hardware Abstraction Layer, which provides
// higher-level drivers.
use liatris::hal;

use rp2040_hal::clocks::ClocksManager;
use rp2040_hal::fugit::RateExtU32;
use rp2040_hal::pll::common_configs::{PLL_SYS_125MHZ, PLL_USB_48MHZ};
use rp2040_hal::pll::setup_pll_blocking;
use rp2040_hal::xosc::setup_xosc_blocking;
use rp2040_hal::Clock;
use usb_device::bus::UsbBusAllocator;

use crate::demo::{Typist, GREETING};
use crate::usb_hiddev::UsbHidTransport;

/// Entry point to our bare-metal application.
///
/// The `#[entry]` macro ensures the Cortex-M start-up code calls this function
/// as soon as all global variables are initialised.
///
/// Brings up clocks and usb, registers the keyboard with the host, then types
/// a short greeting once the host has configured the device.
#[entry]
fn main() -> ! {
    // Safety: first thing on core 0, nothing has logged yet
    unsafe {
        logger::init();
    }
    setup_kbd()
}

#[expect(clippy::cast_possible_truncation)]
fn setup_kbd() -> ! {
    // Grab our singleton objects
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    let xosc = setup_xosc_blocking(pac.XOSC, liatris::XOSC_CRYSTAL_FREQ.Hz()).unwrap();
    watchdog.enable_tick_generation((liatris::XOSC_CRYSTAL_FREQ / 1_000_000) as u8);

    let mut clocks = ClocksManager::new(pac.CLOCKS);
    let pll_sys = setup_pll_blocking(
        pac.PLL_SYS,
        xosc.operating_frequency(),
        PLL_SYS_125MHZ,
        &mut clocks,
        &mut pac.RESETS,
    )
    .unwrap();
    let pll_usb = setup_pll_blocking(
        pac.PLL_USB,
        xosc.operating_frequency(),
        PLL_USB_48MHZ,
        &mut clocks,
        &mut pac.RESETS,
    )
    .unwrap();
    clocks.init_default(&xosc, &pll_sys, &pll_usb).unwrap();
    log::info!("System clock at {} Hz", clocks.system_clock.freq().to_Hz());

    let timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    // Set up the USB driver
    let usb_bus = UsbBusAllocator::new(hal::usb::UsbBus::new(
        pac.USBCTRL_REGS,
        pac.USBCTRL_DPRAM,
        clocks.usb_clock,
        true,
        &mut pac.RESETS,
    ));

    let mut keyboard = match KeyStateAccumulator::new(UsbHidTransport::new(&usb_bus)) {
        Ok(keyboard) => keyboard,
        Err(e) => {
            log::error!("Failed to set up keyboard: {e}");
            halt_loop();
        }
    };
    let mut typist = Typist::new(GREETING);
    let mut was_configured = false;

    loop {
        keyboard.transport_mut().poll();
        let configured = keyboard.transport().is_configured();
        if configured != was_configured {
            log::info!("Usb configured: {configured}");
            if !configured {
                keyboard.release_all();
            }
            was_configured = configured;
        }
        if !configured || typist.is_done() {
            continue;
        }
        if let Err(e) = typist.tick(timer.get_counter(), &mut keyboard) {
            log::warn!("Failed to send report: {e}");
        }
    }
}

fn halt_loop() -> ! {
    loop {
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}

#[panic_handler]
#[inline(never)]
fn halt(_info: &core::panic::PanicInfo) -> ! {
    halt_loop()
}
