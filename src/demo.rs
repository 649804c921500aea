//! The demo application: three fixed menus and the handlers behind them.
//!
//! # Menus
//!
//! ```text
//! main ── 1 sleep ──┐
//!         2 stop  ──┼── wake-up source menu (one pick, then the state is entered)
//!         3 standby ┘
//!         4 backup ──── backup memory menu (loops until reset)
//! ```
//!
//! All state lives in [`Demo`], owned by the entry point. Standby wipes it;
//! only the backup registers come back.

use core::convert::Infallible;
use core::ops::ControlFlow;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use embedded_io::{Read, Write};

use crate::backup::{BackupRegisters, Pattern, RegisterFile, VolatileBlock};
use crate::config::{
    BACKUP_MENU_TITLE, BANNER, FLUSH_DELAY_MS, MAIN_MENU_TITLE, STANDBY_RETURN, WAKEUP_MENU_TITLE,
    WAKEUP_TIMER_MS,
};
use crate::error::Error;
use crate::menu::{Handler, Menu, MenuItem};
use crate::power::{PowerControl, PowerMode};
use crate::wakeup::{WakeSource, WakeupControl};

/// Which memory a backup menu item works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Block {
    /// RTC backup registers.
    Backup,
    /// The volatile mirror block in SRAM.
    Heap,
}

impl Block {
    fn heading(self) -> &'static str {
        match self {
            Self::Backup => "Backup",
            Self::Heap => "Heap",
        }
    }
}

/// Everything a menu item can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Enter(PowerMode),
    OpenBackup,
    List(Block),
    Fill(Block, Pattern),
    Arm(WakeSource),
    Disarm,
}

pub type MainMenu = Menu<Command, 4>;
pub type WakeupMenu = Menu<Command, 4>;
pub type BackupMenu = Menu<Command, 8>;

/// The three menus of the demo, built once at start-up.
pub struct Menus {
    pub main: MainMenu,
    pub wakeup: WakeupMenu,
    pub backup: BackupMenu,
}

impl Menus {
    pub fn build() -> Result<Self, Error> {
        use Command::*;
        use Pattern::*;

        let mut main = MainMenu::new(MAIN_MENU_TITLE);
        for item in [
            MenuItem::new('1', "Enter sleep mode", Enter(PowerMode::Sleep)),
            MenuItem::new('2', "Enter stop mode", Enter(PowerMode::Stop)),
            MenuItem::new('3', "Enter Standby mode", Enter(PowerMode::Standby)),
            MenuItem::new('4', "Access Backup Registers", OpenBackup),
        ] {
            main.add_item(item)?;
        }

        let mut wakeup = WakeupMenu::new(WAKEUP_MENU_TITLE);
        for item in [
            MenuItem::new(
                '1',
                "Wakeup with EXTI interrupt by blue button",
                Arm(WakeSource::Button),
            ),
            MenuItem::new(
                '2',
                "Wakeup with EXTI interrupt by PA0 input",
                Arm(WakeSource::AuxPin),
            ),
            MenuItem::new('3', "Wakeup by RTC", Arm(WakeSource::Timer)),
            MenuItem::new('4', "Disable all wakeup sources. Restart by reset only", Disarm),
        ] {
            wakeup.add_item(item)?;
        }

        let mut backup = BackupMenu::new(BACKUP_MENU_TITLE);
        for item in [
            MenuItem::new('1', "List backup memory contents", List(Block::Backup)),
            MenuItem::new('2', "Clear backup memory to all 0", Fill(Block::Backup, Zero)),
            MenuItem::new('3', "Fill backup memory with all 0xff", Fill(Block::Backup, Ones)),
            MenuItem::new(
                '4',
                "Fill backup memory with successive bytes",
                Fill(Block::Backup, Ascending),
            ),
            MenuItem::new('5', "List heap memory block contents", List(Block::Heap)),
            MenuItem::new('6', "Clear heap memory block to all 0", Fill(Block::Heap, Zero)),
            MenuItem::new('7', "Fill heap memory block with all 0xff", Fill(Block::Heap, Ones)),
            MenuItem::new(
                '8',
                "Fill heap memory block with successive bytes",
                Fill(Block::Heap, Ascending),
            ),
        ] {
            backup.add_item(item)?;
        }

        Ok(Self {
            main,
            wakeup,
            backup,
        })
    }
}

/// Application state: the board collaborators, the register file and the
/// volatile block it is compared with.
pub struct Demo<'m, C, P, W, R, L, D> {
    menus: &'m Menus,
    console: C,
    power: P,
    wakeup: W,
    registers: RegisterFile<R>,
    heap: VolatileBlock,
    led: L,
    delay: D,
}

impl<'m, C, P, W, R, L, D> Demo<'m, C, P, W, R, L, D>
where
    C: Read + Write,
    P: PowerControl,
    W: WakeupControl,
    R: BackupRegisters,
    L: OutputPin<Error = Infallible>,
    D: DelayMs<u32>,
{
    pub fn new(
        menus: &'m Menus,
        console: C,
        power: P,
        wakeup: W,
        registers: R,
        led: L,
        delay: D,
    ) -> Self {
        Self {
            menus,
            console,
            power,
            wakeup,
            registers: RegisterFile::new(registers),
            heap: VolatileBlock::new(),
            led,
            delay,
        }
    }

    /// Resets the wake-up sources, greets the operator and runs the main
    /// menu for as long as the firmware lives.
    ///
    /// Only returns on an error.
    pub fn run(&mut self) -> Result<Infallible, Error> {
        self.wakeup.disable_all();
        let Ok(()) = self.led.set_high();

        if self.power.woke_from_standby() {
            info!("back from standby");
            self.console
                .write_all(STANDBY_RETURN.as_bytes())
                .map_err(Error::transport)?;
        }
        self.console
            .write_all(BANNER.as_bytes())
            .map_err(Error::transport)?;

        let menus = self.menus;
        let mut show_title = true;
        loop {
            menus.main.run(show_title, self)?;
            show_title = false;
        }
    }

    pub fn registers(&self) -> &RegisterFile<R> {
        &self.registers
    }

    pub fn heap(&self) -> &VolatileBlock {
        &self.heap
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Lets the operator pick a wake-up source, then enters `mode`.
    fn enter(&mut self, mode: PowerMode) -> Result<(), Error> {
        let menus = self.menus;
        menus.wakeup.run(false, self)?;

        self.console
            .write_all(mode.farewell().as_bytes())
            .map_err(Error::transport)?;
        self.console.flush().map_err(Error::transport)?;
        self.delay.delay_ms(FLUSH_DELAY_MS);
        let Ok(()) = self.led.set_low();

        info!("entering {}", mode);
        match mode {
            PowerMode::Sleep => self.power.enter_sleep(),
            PowerMode::Stop => {
                self.power.enter_stop();
                self.power.restore_clocks()?;
            }
            PowerMode::Standby => self.power.enter_standby(),
        }

        if let Some(source) = self.wakeup.take_wake_event() {
            info!("woken by {}", source);
            write!(self.console, "Woken up by {}\r\n", source.name())?;
        }
        self.wakeup.disable_all();
        let Ok(()) = self.led.set_high();
        Ok(())
    }

    fn arm(&mut self, source: WakeSource) -> Result<(), Error> {
        info!("arming {}", source);
        match source {
            WakeSource::Button => self.wakeup.arm_button(),
            WakeSource::AuxPin => self.wakeup.arm_aux_pin(),
            WakeSource::Timer => self.wakeup.arm_timer(WAKEUP_TIMER_MS)?,
        }
        Ok(())
    }

    fn list(&mut self, block: Block) -> Result<(), Error> {
        write!(self.console, "\r\n{}: ", block.heading())?;
        match block {
            Block::Backup => {
                for index in 0..self.registers.capacity() {
                    let value = self.registers.read(index)?;
                    write!(self.console, "{value:02x} ")?;
                }
            }
            Block::Heap => {
                for value in self.heap.as_slice() {
                    write!(self.console, "{value:02x} ")?;
                }
            }
        }
        self.console
            .write_all(b"\r\n")
            .map_err(Error::transport)
    }

    fn fill(&mut self, block: Block, pattern: Pattern) -> Result<(), Error> {
        debug!("filling {} with {}", block, pattern);
        match block {
            Block::Backup => self.registers.fill(pattern),
            Block::Heap => {
                self.heap.fill(pattern);
                Ok(())
            }
        }
    }
}

impl<C, P, W, R, L, D> Handler<Command> for Demo<'_, C, P, W, R, L, D>
where
    C: Read + Write,
    P: PowerControl,
    W: WakeupControl,
    R: BackupRegisters,
    L: OutputPin<Error = Infallible>,
    D: DelayMs<u32>,
{
    type Console = C;

    fn console(&mut self) -> &mut C {
        &mut self.console
    }

    fn invoke(&mut self, command: Command, selector: char) -> Result<ControlFlow<()>, Error> {
        trace!("selector {=char}: {}", selector, command);
        match command {
            Command::Enter(mode) => self.enter(mode)?,
            Command::OpenBackup => {
                let menus = self.menus;
                menus.backup.run(false, self)?;
            }
            Command::List(block) => self.list(block)?,
            Command::Fill(block, pattern) => self.fill(block, pattern)?,
            Command::Arm(source) => {
                self.arm(source)?;
                return Ok(ControlFlow::Break(()));
            }
            Command::Disarm => {
                info!("disabling all wake-up sources");
                self.wakeup.disable_all();
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}
