//! Low-power mode demo firmware for the NUCLEO-F303RE.
//!
//! # Overview
//!
//! The STM32F303 has three low-power states, each one switching off more of
//! the chip than the last:
//! - **Sleep**: core stopped, I/O and peripherals keep their state
//! - **Stop**: HSI/HSE and the PLL stopped too, SRAM and registers kept
//! - **Standby**: SRAM and registers lost, only the RTC domain keeps running
//!
//! The operator drives the demo from a serial terminal on the ST-LINK
//! virtual COM port (115200 8N1). Before every state change the demo asks
//! for a wake-up source. A backup memory menu fills and lists the RTC backup
//! registers and a RAM block of the same size, to show which one survives
//! Standby.
//!
//! # Fatal Errors
//!
//! Out-of-range backup register access, a clock that will not come back
//! after Stop and console failures all end in [`fatal`]: interrupts off,
//! core parked until reset.
//!
//! # Module Organization
//!
//! - [`sleep_demo::demo`] - Menus and handlers
//! - [`sleep_demo::hardware`] - Pin mappings and peripheral drivers

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::{
    Config,
    rcc::{
        AHBPrescaler, APBPrescaler, LsConfig, LseConfig, LseDrive, LseMode, Pll, PllMul,
        PllPreDiv, PllSource, RtcClockSource, Sysclk,
    },
    time::Hertz,
};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sleep_demo::Error;
use sleep_demo::config::RTC_CLOCK_HZ;
use sleep_demo::demo::{Demo, Menus};
use sleep_demo::hardware::Peripherals;

/// Menus live for the whole run, shared by reference with the demo.
static MENUS: StaticCell<Menus> = StaticCell::new();

/// Creates the run-mode clock configuration.
///
/// # Clock Settings
///
/// - **HSI**: 8 MHz internal oscillator, PLL ×9 → 72 MHz SYSCLK
/// - **APB1**: 36 MHz (USART2, PWR), **APB2**: 72 MHz
/// - **LSE**: 32.768 kHz crystal, low drive, clocking the RTC
///
/// Stop mode switches SYSCLK back to HSI; the PLL is restarted by
/// `PowerControl::restore_clocks`.
fn create_clock_config() -> embassy_stm32::rcc::Config {
    let mut rcc = embassy_stm32::rcc::Config::default();
    rcc.hsi = true;
    rcc.pll = Some(Pll {
        src: PllSource::HSI,
        prediv: PllPreDiv::DIV1,
        mul: PllMul::MUL9,
    });
    rcc.sys = Sysclk::PLL1_P;
    rcc.ahb_pre = AHBPrescaler::DIV1;
    rcc.apb1_pre = APBPrescaler::DIV2;
    rcc.apb2_pre = APBPrescaler::DIV1;
    rcc.ls = LsConfig {
        rtc: RtcClockSource::LSE,
        lsi: false,
        lse: Some(LseConfig {
            frequency: Hertz::hz(RTC_CLOCK_HZ),
            mode: LseMode::Oscillator(LseDrive::Low),
        }),
    };
    rcc
}

/// Logs `error`, disables interrupts and parks the core until reset.
fn fatal(error: Error) -> ! {
    defmt::error!("fatal: {}", error);
    cortex_m::interrupt::disable();
    loop {
        cortex_m::asm::nop();
    }
}

/// Main entry point for the low-power demo.
///
/// # Initialization Sequence
///
/// 1. Configure clocks (72 MHz from HSI/PLL, LSE for the RTC)
/// 2. Initialize STM32 peripherals
/// 3. Build the three menus
/// 4. Hand the peripherals to the demo and run the main menu forever
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let mut config = Config::default();
    config.rcc = create_clock_config();

    let p = embassy_stm32::init(config);

    // Wait 3 seconds after boot to allow debugger connection
    // before the first low-power state can be entered.
    #[cfg(feature = "debug-mode")]
    {
        defmt::info!("Waiting 3 seconds for debugger connection...");
        embassy_time::Timer::after_secs(3).await;
    }

    // SAFETY: nothing else in the firmware takes the core peripherals.
    let core = unsafe { cortex_m::Peripherals::steal() };

    let menus = match Menus::build() {
        Ok(menus) => MENUS.init(menus),
        Err(e) => fatal(e),
    };
    let board = match Peripherals::new(p, core.SCB) {
        Ok(board) => board,
        Err(e) => fatal(e),
    };

    defmt::info!("Low power demo starting...");

    let mut demo = Demo::new(
        menus,
        board.console,
        board.power,
        board.wakeup,
        board.backup,
        board.led,
        board.delay,
    );
    let Err(error) = demo.run();
    fatal(error)
}
