//! Wake-up sources that end a low-power state.

use crate::error::Error;

/// A hardware event that can end a low-power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeSource {
    /// EXTI interrupt from the blue user button.
    Button,
    /// EXTI interrupt from the auxiliary input pin.
    AuxPin,
    /// RTC wake-up timer.
    Timer,
}

impl WakeSource {
    pub fn name(self) -> &'static str {
        match self {
            Self::Button => "user button",
            Self::AuxPin => "auxiliary pin",
            Self::Timer => "RTC wake-up timer",
        }
    }
}

/// Arming and disarming of wake-up sources.
///
/// Arming is additive: enabling one source leaves any other armed source
/// enabled until [`disable_all`](Self::disable_all). All operations are
/// idempotent.
pub trait WakeupControl {
    fn arm_button(&mut self);

    fn arm_aux_pin(&mut self);

    /// Starts the periodic wake-up timer. Fails with
    /// [`Error::WakeupTimer`] if the timer does not accept the new period.
    fn arm_timer(&mut self, duration_ms: u32) -> Result<(), Error>;

    fn disable_all(&mut self);

    /// Source that ended the last low-power state, if one was recorded.
    fn take_wake_event(&mut self) -> Option<WakeSource> {
        None
    }
}
