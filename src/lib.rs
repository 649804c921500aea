//! Low-power mode demo for the NUCLEO-F303RE.
//!
//! # Overview
//!
//! A serial menu on the ST-LINK virtual COM port lets the operator:
//! - put the STM32F303 into Sleep, Stop or Standby
//! - pick the wake-up source first: user button, PA0, RTC timer, or none
//! - fill and list the RTC backup registers and a block of ordinary RAM of
//!   the same size, to see which one survives Standby
//!
//! # Module Organization
//!
//! - [`menu`] - Single-keystroke menu engine
//! - [`demo`] - The three demo menus and their handlers
//! - [`backup`] - Bounds-checked backup register file and the volatile block
//! - [`power`] - Low-power states and the trait that enters them
//! - [`wakeup`] - Wake-up sources and the trait that arms them
//! - [`transport`] - Console echo
//! - [`hardware`] - STM32F303 implementations (`stm32` feature)
//!
//! Everything except [`hardware`] is plain `no_std` code and is unit tested
//! on the host.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod backup;
pub mod config;
pub mod demo;
pub mod error;
pub mod menu;
pub mod power;
pub mod transport;
pub mod wakeup;

#[cfg(feature = "stm32")]
pub mod hardware;

#[cfg(test)]
mod testing;

pub use error::Error;
