//! Battery-backed register file and the volatile block it is compared with.
//!
//! The RTC backup registers keep their contents through Standby, which
//! resets everything else. [`VolatileBlock`] is ordinary RAM of the same
//! length; after a Standby round trip it comes back zeroed while the
//! registers do not.

use crate::config::BACKUP_REGISTER_COUNT;
use crate::error::Error;

/// Raw access to the backup registers.
///
/// Implementations may assume `index < BACKUP_REGISTER_COUNT`; bounds are
/// checked by [`RegisterFile`].
pub trait BackupRegisters {
    fn read_raw(&self, index: usize) -> u32;

    /// Only called between [`unlock`](Self::unlock) and [`lock`](Self::lock).
    fn write_raw(&mut self, index: usize, value: u32);

    /// Lifts the backup domain write protection.
    fn unlock(&mut self);

    /// Restores the backup domain write protection.
    fn lock(&mut self);
}

/// Fill patterns offered by the backup memory menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    /// Every cell 0.
    Zero,
    /// Every cell 0xff.
    Ones,
    /// Every cell holds its own index.
    Ascending,
}

impl Pattern {
    pub fn word(self, index: usize) -> u32 {
        match self {
            Self::Zero => 0,
            Self::Ones => 0xff,
            Self::Ascending => index as u32,
        }
    }

    pub fn byte(self, index: usize) -> u8 {
        match self {
            Self::Zero => 0,
            Self::Ones => 0xff,
            Self::Ascending => index as u8,
        }
    }
}

/// Bounds-checked, write-guarded access to the backup registers.
pub struct RegisterFile<R> {
    registers: R,
}

impl<R: BackupRegisters> RegisterFile<R> {
    pub fn new(registers: R) -> Self {
        Self { registers }
    }

    pub const fn capacity(&self) -> usize {
        BACKUP_REGISTER_COUNT
    }

    pub fn read(&self, index: usize) -> Result<u32, Error> {
        self.check(index)?;
        Ok(self.registers.read_raw(index))
    }

    /// Writes one register, holding the write protection open only for the
    /// duration of the store.
    pub fn write(&mut self, index: usize, value: u32) -> Result<(), Error> {
        self.check(index)?;
        self.registers.unlock();
        self.registers.write_raw(index, value);
        self.registers.lock();
        Ok(())
    }

    pub fn fill(&mut self, pattern: Pattern) -> Result<(), Error> {
        for index in 0..self.capacity() {
            self.write(index, pattern.word(index))?;
        }
        Ok(())
    }

    pub fn registers(&self) -> &R {
        &self.registers
    }

    fn check(&self, index: usize) -> Result<(), Error> {
        if index < self.capacity() {
            Ok(())
        } else {
            error!("backup register {=usize} out of range", index);
            Err(Error::RegisterIndex {
                index,
                capacity: self.capacity(),
            })
        }
    }
}

/// Plain RAM the same size as the register file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolatileBlock {
    cells: [u8; BACKUP_REGISTER_COUNT],
}

impl VolatileBlock {
    pub const fn new() -> Self {
        Self {
            cells: [0; BACKUP_REGISTER_COUNT],
        }
    }

    pub fn fill(&mut self, pattern: Pattern) {
        for (index, cell) in self.cells.iter_mut().enumerate() {
            *cell = pattern.byte(index);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for VolatileBlock {
    fn default() -> Self {
        Self::new()
    }
}
