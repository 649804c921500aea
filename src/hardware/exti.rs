//! Wake-up sources: EXTI lines for the two pins and the RTC wake-up timer.
//!
//! EXTI13 (PC13, falling), EXTI0 (PA0, rising) and EXTI20 (RTC wake-up,
//! rising) are configured once at start-up and stay unmasked in the EXTI.
//! Arming a source only unmasks its interrupt in the NVIC, which is what
//! ends Sleep and Stop.
//!
//! The interrupt handlers clear their pending bit and record the source in
//! [`WAKE_SIGNAL`] for the demo to report.

use cortex_m::peripheral::NVIC;
use embassy_stm32::gpio::Input;
use embassy_stm32::pac;
use embassy_stm32::pac::Interrupt;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use pac::interrupt;

use super::rtc;
use crate::config::wakeup_ticks;
use crate::error::Error;
use crate::wakeup::{WakeSource, WakeupControl};

/// EXTI line of the blue user button (PC13)
const BUTTON_LINE: usize = 13;

/// EXTI line of the auxiliary wake input (PA0)
const AUX_LINE: usize = 0;

/// EXTI line internally wired to the RTC wake-up timer
const RTC_WAKEUP_LINE: usize = 20;

/// Register index for EXTI lines 0-31
const EXTI_REG_IDX: usize = 0;

/// SYSCFG_EXTICR port codes
const PORT_A: u8 = 0;
const PORT_C: u8 = 2;

/// Last source that fired, set from interrupt context.
static WAKE_SIGNAL: Signal<CriticalSectionRawMutex, WakeSource> = Signal::new();

/// Wake-up source control for the NUCLEO-F303RE.
pub struct WakeupSources {
    /// B1 on PC13, kept configured as input
    _button: Input<'static>,
    /// PA0, kept configured as input
    _aux: Input<'static>,
}

impl WakeupSources {
    /// Routes PC13 and PA0 to their EXTI lines and sets the edge triggers.
    ///
    /// Nothing can wake the core until one of the `arm_*` calls unmasks an
    /// NVIC line.
    pub fn new(button: Input<'static>, aux: Input<'static>) -> Self {
        pac::RCC.apb2enr().modify(|w| w.set_syscfgen(true));
        pac::SYSCFG
            .exticr(BUTTON_LINE / 4)
            .modify(|w| w.set_exti(BUTTON_LINE % 4, PORT_C));
        pac::SYSCFG
            .exticr(AUX_LINE / 4)
            .modify(|w| w.set_exti(AUX_LINE % 4, PORT_A));

        let exti = pac::EXTI;
        exti.ftsr(EXTI_REG_IDX)
            .modify(|w| w.set_line(BUTTON_LINE, true));
        exti.rtsr(EXTI_REG_IDX).modify(|w| {
            w.set_line(AUX_LINE, true);
            w.set_line(RTC_WAKEUP_LINE, true);
        });
        exti.imr(EXTI_REG_IDX).modify(|w| {
            w.set_line(BUTTON_LINE, true);
            w.set_line(AUX_LINE, true);
            w.set_line(RTC_WAKEUP_LINE, true);
        });

        Self {
            _button: button,
            _aux: aux,
        }
    }
}

impl WakeupControl for WakeupSources {
    fn arm_button(&mut self) {
        clear_pending(BUTTON_LINE);
        // SAFETY: EXTI15_10 only clears its flag and signals.
        unsafe { NVIC::unmask(Interrupt::EXTI15_10) };
    }

    fn arm_aux_pin(&mut self) {
        clear_pending(AUX_LINE);
        // SAFETY: EXTI0 only clears its flag and signals.
        unsafe { NVIC::unmask(Interrupt::EXTI0) };
    }

    fn arm_timer(&mut self, duration_ms: u32) -> Result<(), Error> {
        rtc::start_wakeup_timer(wakeup_ticks(duration_ms))?;
        clear_pending(RTC_WAKEUP_LINE);
        // SAFETY: RTC_WKUP only clears its flags and signals.
        unsafe { NVIC::unmask(Interrupt::RTC_WKUP) };
        Ok(())
    }

    fn disable_all(&mut self) {
        rtc::stop_wakeup_timer();
        NVIC::mask(Interrupt::EXTI0);
        NVIC::mask(Interrupt::EXTI15_10);
        NVIC::mask(Interrupt::RTC_WKUP);
        // The RTC sets WUF on every wake-up event and nothing clears it
        pac::PWR.cr().modify(|w| w.set_cwuf(true));
        WAKE_SIGNAL.reset();
    }

    fn take_wake_event(&mut self) -> Option<WakeSource> {
        WAKE_SIGNAL.try_take()
    }
}

fn clear_pending(line: usize) {
    pac::EXTI
        .pr(EXTI_REG_IDX)
        .write(|w| w.set_line(line, true));
}

#[interrupt]
fn EXTI0() {
    clear_pending(AUX_LINE);
    WAKE_SIGNAL.signal(WakeSource::AuxPin);
}

#[interrupt]
fn EXTI15_10() {
    clear_pending(BUTTON_LINE);
    WAKE_SIGNAL.signal(WakeSource::Button);
}

#[interrupt]
fn RTC_WKUP() {
    rtc::clear_wakeup_flag();
    clear_pending(RTC_WAKEUP_LINE);
    WAKE_SIGNAL.signal(WakeSource::Timer);
}
