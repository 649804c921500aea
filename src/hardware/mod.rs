//! NUCLEO-F303RE bindings for the demo collaborators.
//!
//! # Pin Assignments
//!
//! ## Console (USART2, ST-LINK virtual COM port)
//! - **PA2**: USART2_TX
//! - **PA3**: USART2_RX
//!
//! ## Status
//! - **PA5**: LD2 green user LED, lit while the core runs
//!
//! ## Wake-up inputs
//! - **PC13**: B1 blue user button, active low, EXTI13
//! - **PA0**: auxiliary wake input, active high, EXTI0
//!
//! ## Low Power & RTC
//! - **PC14**: OSC32_IN - 32.768 kHz crystal input
//! - **PC15**: OSC32_OUT - 32.768 kHz crystal output
//!
//! ## Debug (SWD)
//! - **PA13**: SWDIO
//! - **PA14**: SWCLK

mod exti;
mod pwr;
mod rtc;
mod serial;

use cortex_m::peripheral::SCB;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::usart;
use embassy_time::Delay;
use embedded_io::ErrorKind;

use crate::config::BAUD_RATE;
use crate::error::Error;
use crate::transport::Echo;

pub use exti::WakeupSources;
pub use pwr::LowPower;
pub use rtc::BackupDomain;
pub use serial::SerialPort;

/// Everything [`crate::demo::Demo`] needs from the board.
pub struct Peripherals {
    /// Operator terminal, echoing keystrokes
    pub console: Echo<SerialPort>,
    /// Sleep/Stop/Standby entry
    pub power: LowPower,
    /// Button, PA0 and RTC wake-up sources
    pub wakeup: WakeupSources,
    /// RTC backup registers
    pub backup: BackupDomain,
    /// LD2
    pub led: Output<'static>,
    /// Blocking delay on the embassy time driver
    pub delay: Delay,
}

impl Peripherals {
    /// Initializes the demo peripherals from the STM32 peripheral singleton.
    ///
    /// # Initial GPIO States
    ///
    /// - PA5 (LD2): Low until the demo starts
    /// - PC13 (B1): Input, external pull-up on the board
    /// - PA0: Input with pull-down
    ///
    /// # Arguments
    ///
    /// * `p` - STM32 peripheral singleton from embassy_stm32::init()
    /// * `scb` - Cortex-M system control block, for SLEEPDEEP
    pub fn new(p: embassy_stm32::Peripherals, scb: SCB) -> Result<Self, Error> {
        let mut uart_config = usart::Config::default();
        uart_config.baudrate = BAUD_RATE;
        let uart = usart::Uart::new_blocking(p.USART2, p.PA3, p.PA2, uart_config)
            .map_err(|_| Error::Transport(ErrorKind::Unsupported))?;

        Ok(Self {
            console: Echo::new(SerialPort::new(uart)),
            power: LowPower::new(scb),
            wakeup: WakeupSources::new(
                Input::new(p.PC13, Pull::None),
                Input::new(p.PA0, Pull::Down),
            ),
            backup: BackupDomain::new(),
            led: Output::new(p.PA5, Level::Low, Speed::Low),
            delay: Delay,
        })
    }
}
