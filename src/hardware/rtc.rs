//! RTC backup domain: the backup registers and the wake-up timer.
//!
//! Both live behind the backup domain write protection (PWR_CR.DBP), and
//! the RTC registers additionally behind the RTC_WPR key sequence.

use embassy_stm32::pac;
use embassy_stm32::pac::rtc::vals::Wucksel;

use crate::backup::BackupRegisters;
use crate::config::CLOCK_READY_SPINS;
use crate::error::Error;

/// RTC_BKP0R..RTC_BKP15R.
pub struct BackupDomain {
    _private: (),
}

impl BackupDomain {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

impl BackupRegisters for BackupDomain {
    fn read_raw(&self, index: usize) -> u32 {
        pac::RTC.bkpr(index).read().bkp()
    }

    fn write_raw(&mut self, index: usize, value: u32) {
        pac::RTC.bkpr(index).write(|w| w.set_bkp(value));
    }

    fn unlock(&mut self) {
        pac::PWR.cr().modify(|w| w.set_dbp(true));
    }

    fn lock(&mut self) {
        pac::PWR.cr().modify(|w| w.set_dbp(false));
    }
}

/// Arms the periodic wake-up timer on RTCCLK/16 with interrupt.
///
/// The timer is left disabled if WUTWF never sets.
pub(crate) fn start_wakeup_timer(ticks: u32) -> Result<(), Error> {
    with_rtc_unlocked(|rtc| {
        rtc.cr().modify(|w| w.set_wute(false));
        if !spin_until(|| rtc.isr().read().wutwf()) {
            warn!("rtc wake-up timer not writable");
            return Err(Error::WakeupTimer);
        }
        rtc.wutr().write(|w| w.set_wut(ticks.min(u16::MAX as u32) as u16));
        rtc.isr().modify(|w| w.set_wutf(false));
        rtc.cr().modify(|w| {
            w.set_wucksel(Wucksel::DIV16);
            w.set_wutie(true);
            w.set_wute(true);
        });
        Ok(())
    })
}

pub(crate) fn stop_wakeup_timer() {
    with_rtc_unlocked(|rtc| {
        rtc.cr().modify(|w| {
            w.set_wutie(false);
            w.set_wute(false);
        });
        rtc.isr().modify(|w| w.set_wutf(false));
    });
}

pub(crate) fn clear_wakeup_flag() {
    with_rtc_unlocked(|rtc| rtc.isr().modify(|w| w.set_wutf(false)));
}

fn with_rtc_unlocked<R>(f: impl FnOnce(pac::rtc::Rtc) -> R) -> R {
    let pwr = pac::PWR;
    let rtc = pac::RTC;

    pwr.cr().modify(|w| w.set_dbp(true));
    rtc.wpr().write(|w| w.set_key(0xca));
    rtc.wpr().write(|w| w.set_key(0x53));

    let result = f(rtc);

    rtc.wpr().write(|w| w.set_key(0xff));
    pwr.cr().modify(|w| w.set_dbp(false));
    result
}

fn spin_until(ready: impl Fn() -> bool) -> bool {
    (0..CLOCK_READY_SPINS).any(|_| ready())
}
