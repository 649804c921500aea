//! Host-side stand-ins for the board, shared by the unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use embedded_io::{ErrorKind, ErrorType, Read, Write};

use crate::backup::BackupRegisters;
use crate::config::BACKUP_REGISTER_COUNT;
use crate::error::Error;
use crate::power::PowerControl;
use crate::wakeup::{WakeSource, WakeupControl};

/// Console fed from a fixed script. Reads return `Ok(0)` once the script is
/// used up.
#[derive(Default)]
pub struct ScriptedConsole {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl ScriptedConsole {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.bytes().collect(),
            output: Vec::new(),
        }
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl ErrorType for ScriptedConsole {
    type Error = ErrorKind;
}

impl Read for ScriptedConsole {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        match (self.input.pop_front(), buf.first_mut()) {
            (Some(byte), Some(slot)) => {
                *slot = byte;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

impl Write for ScriptedConsole {
    fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), ErrorKind> {
        Ok(())
    }
}

/// Board-level side effects in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    ArmButton,
    ArmAuxPin,
    ArmTimer(u32),
    DisableAll,
    EnterSleep,
    EnterStop,
    RestoreClocks,
    LedOn,
    LedOff,
    Delay(u32),
}

/// Event log shared by every fake peripheral of one test.
pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct FakePower {
    log: Log,
    pub standby_flag: bool,
    pub clock_failure: bool,
}

impl FakePower {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            standby_flag: false,
            clock_failure: false,
        }
    }
}

impl PowerControl for FakePower {
    fn enter_sleep(&mut self) {
        self.log.borrow_mut().push(Event::EnterSleep);
    }

    fn enter_stop(&mut self) {
        self.log.borrow_mut().push(Event::EnterStop);
    }

    fn enter_standby(&mut self) -> ! {
        panic!("entered standby after {:?}", self.log.borrow());
    }

    fn restore_clocks(&mut self) -> Result<(), Error> {
        self.log.borrow_mut().push(Event::RestoreClocks);
        if self.clock_failure {
            Err(Error::ClockConfig)
        } else {
            Ok(())
        }
    }

    fn woke_from_standby(&mut self) -> bool {
        core::mem::take(&mut self.standby_flag)
    }
}

pub struct FakeWakeup {
    log: Log,
    pub pending: Option<WakeSource>,
    pub timer_failure: bool,
}

impl FakeWakeup {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            pending: None,
            timer_failure: false,
        }
    }
}

impl WakeupControl for FakeWakeup {
    fn arm_button(&mut self) {
        self.log.borrow_mut().push(Event::ArmButton);
    }

    fn arm_aux_pin(&mut self) {
        self.log.borrow_mut().push(Event::ArmAuxPin);
    }

    fn arm_timer(&mut self, duration_ms: u32) -> Result<(), Error> {
        self.log.borrow_mut().push(Event::ArmTimer(duration_ms));
        if self.timer_failure {
            Err(Error::WakeupTimer)
        } else {
            Ok(())
        }
    }

    fn disable_all(&mut self) {
        self.log.borrow_mut().push(Event::DisableAll);
    }

    fn take_wake_event(&mut self) -> Option<WakeSource> {
        self.pending.take()
    }
}

pub struct FakeLed(pub Log);

impl OutputPin for FakeLed {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().push(Event::LedOff);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().push(Event::LedOn);
        Ok(())
    }
}

pub struct FakeDelay(pub Log);

impl DelayMs<u32> for FakeDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(Event::Delay(ms));
    }
}

/// Backup registers in RAM that refuse writes while locked.
pub struct MemoryRegisters {
    pub cells: [u32; BACKUP_REGISTER_COUNT],
    pub locked: bool,
    pub unlocks: usize,
    pub locks: usize,
}

impl Default for MemoryRegisters {
    fn default() -> Self {
        Self {
            cells: [0; BACKUP_REGISTER_COUNT],
            locked: true,
            unlocks: 0,
            locks: 0,
        }
    }
}

impl BackupRegisters for MemoryRegisters {
    fn read_raw(&self, index: usize) -> u32 {
        self.cells[index]
    }

    fn write_raw(&mut self, index: usize, value: u32) {
        assert!(!self.locked, "write to backup register {index} while locked");
        self.cells[index] = value;
    }

    fn unlock(&mut self) {
        self.locked = false;
        self.unlocks += 1;
    }

    fn lock(&mut self) {
        self.locked = true;
        self.locks += 1;
    }
}
