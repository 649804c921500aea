//! Build-time configuration of the demo.

/// Number of RTC backup registers (RTC_BKP0R..RTC_BKP15R on STM32F303).
///
/// The volatile mirror block has the same length so the two can be compared
/// after a power-mode round trip.
pub const BACKUP_REGISTER_COUNT: usize = 16;

/// Interval armed by the "wake up by RTC" menu item.
pub const WAKEUP_TIMER_MS: u32 = 5_000;

/// LSE crystal feeding the RTC.
pub const RTC_CLOCK_HZ: u32 = 32_768;

/// Wake-up timer prescaler (RTCCLK/16).
pub const RTC_WAKEUP_DIVIDER: u32 = 16;

/// Time given to the UART to shift out the farewell line before the core
/// stops its clocks.
pub const FLUSH_DELAY_MS: u32 = 5;

/// USART2 speed of the ST-LINK virtual COM port.
pub const BAUD_RATE: u32 = 115_200;

/// Polling budget when waiting for an oscillator or clock switch.
pub const CLOCK_READY_SPINS: u32 = 100_000;

pub const BANNER: &str = "\r\nARM Low Power demo\r\n\r\n";
pub const STANDBY_RETURN: &str = "\r\nWoke up from Standby mode\r\n";

pub const MAIN_MENU_TITLE: &str = "Sleep demo menu----------------------";
pub const WAKEUP_MENU_TITLE: &str = "Select wakeup source signal--------";
pub const BACKUP_MENU_TITLE: &str = "Select backup memory operation-----";

/// Converts a wake-up interval to RTC wake-up timer ticks.
pub const fn wakeup_ticks(duration_ms: u32) -> u32 {
    duration_ms * (RTC_CLOCK_HZ / RTC_WAKEUP_DIVIDER) / 1000
}
