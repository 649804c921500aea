//! Low-power states of the demo.
//!
//! Power consumption drops with each state as more of the chip is switched
//! off:
//!
//! - **Sleep**: the core stops, peripherals keep running. Any enabled
//!   interrupt wakes it.
//! - **Stop**: the core and the high speed clocks stop, SRAM and registers
//!   are kept. Only EXTI lines wake it, and the system clock falls back to
//!   HSI on wake-up.
//! - **Standby**: everything but the RTC domain loses power. Waking up is a
//!   reset; only the backup registers survive.

use crate::error::Error;

/// Low-power state picked from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    Sleep,
    Stop,
    Standby,
}

impl PowerMode {
    /// Line printed just before the state is entered.
    pub fn farewell(self) -> &'static str {
        match self {
            Self::Sleep => "Entering Sleep mode now, Good Night!\r\n",
            Self::Stop => "Entering Stop mode now, Good Night!\r\n",
            Self::Standby => "Entering Standby mode now, Farewell and see you in the next life!\r\n",
        }
    }
}

/// Entry into the low-power states.
///
/// Every `enter_*` call blocks until a wake-up source fires.
pub trait PowerControl {
    fn enter_sleep(&mut self);

    /// Returns with the system clock running from HSI; call
    /// [`restore_clocks`](Self::restore_clocks) before relying on timing.
    fn enter_stop(&mut self);

    /// Waking from Standby restarts the firmware from reset.
    fn enter_standby(&mut self) -> !;

    /// Brings the system clock back to its run-mode configuration.
    fn restore_clocks(&mut self) -> Result<(), Error>;

    /// Whether this boot is a wake-up from Standby. Clears the flag.
    fn woke_from_standby(&mut self) -> bool;
}
