//! Sleep, Stop and Standby entry on the STM32F303.
//!
//! All three states are entered with WFI. What differs is the SLEEPDEEP bit
//! in the Cortex-M4 System Control register and PDDS/LPDS in PWR_CR:
//!
//! | State   | SLEEPDEEP | PDDS | LPDS |
//! |---------|-----------|------|------|
//! | Sleep   | 0         | -    | -    |
//! | Stop    | 1         | 0    | 1    |
//! | Standby | 1         | 1    | -    |
//!
//! The embassy time driver runs on TIM2. Its interrupt is masked while
//! the core sleeps, otherwise the next timer overflow would end Sleep
//! straight away.

use cortex_m::peripheral::{NVIC, SCB};
use embassy_stm32::pac;
use embassy_stm32::pac::pwr::vals::Pdds;
use embassy_stm32::pac::rcc::vals::Sw;

use crate::config::CLOCK_READY_SPINS;
use crate::error::Error;
use crate::power::PowerControl;

/// Owner of SLEEPDEEP and the PWR_CR low-power bits.
pub struct LowPower {
    scb: SCB,
}

impl LowPower {
    /// Enables the PWR clock. With `debug-mode` the debug interface is kept
    /// clocked in every low-power state so a probe stays attached.
    pub fn new(scb: SCB) -> Self {
        pac::RCC.apb1enr().modify(|w| w.set_pwren(true));

        #[cfg(feature = "debug-mode")]
        pac::DBGMCU.cr().modify(|w| {
            w.set_dbg_sleep(true);
            w.set_dbg_stop(true);
            w.set_dbg_standby(true);
        });

        Self { scb }
    }
}

impl PowerControl for LowPower {
    fn enter_sleep(&mut self) {
        self.scb.clear_sleepdeep();
        self.scb.clear_sleeponexit();
        with_tick_suspended(cortex_m::asm::wfi);
    }

    fn enter_stop(&mut self) {
        pac::PWR.cr().modify(|w| {
            w.set_pdds(Pdds::STOP_MODE);
            w.set_lpds(true);
        });
        self.scb.set_sleepdeep();
        with_tick_suspended(cortex_m::asm::wfi);
        self.scb.clear_sleepdeep();
    }

    fn enter_standby(&mut self) -> ! {
        pac::PWR.cr().modify(|w| {
            w.set_pdds(Pdds::STANDBY_MODE);
            // A stale wake-up flag would end Standby immediately
            w.set_cwuf(true);
        });
        self.scb.set_sleepdeep();
        NVIC::mask(embassy_stm32::interrupt::TIM2);
        loop {
            cortex_m::asm::wfi();
        }
    }

    /// Stop leaves the core on HSI with the PLL off. The PLL source and
    /// multiplier survive, so turning it back on restores SYSCLK.
    fn restore_clocks(&mut self) -> Result<(), Error> {
        let rcc = pac::RCC;

        rcc.cr().modify(|w| w.set_pllon(true));
        wait_for(|| rcc.cr().read().pllrdy())?;

        rcc.cfgr().modify(|w| w.set_sw(Sw::PLL1_P));
        wait_for(|| rcc.cfgr().read().sws() == Sw::PLL1_P)?;

        debug!("system clock back on PLL");
        Ok(())
    }

    fn woke_from_standby(&mut self) -> bool {
        let pwr = pac::PWR;
        let standby = pwr.csr().read().sbf();
        if standby {
            pwr.cr().modify(|w| {
                w.set_csbf(true);
                w.set_cwuf(true);
            });
        }
        standby
    }
}

/// Runs `f` with the time driver interrupt masked.
fn with_tick_suspended(f: impl FnOnce()) {
    NVIC::mask(embassy_stm32::interrupt::TIM2);
    f();
    // SAFETY: re-enables the interrupt embassy_stm32::init() enabled.
    unsafe {
        NVIC::unmask(embassy_stm32::interrupt::TIM2);
    }
}

fn wait_for(ready: impl Fn() -> bool) -> Result<(), Error> {
    for _ in 0..CLOCK_READY_SPINS {
        if ready() {
            return Ok(());
        }
    }
    error!("clock not ready after {=u32} polls", CLOCK_READY_SPINS);
    Err(Error::ClockConfig)
}
