//! Playmatic pinball MPU output-device core.
//!
//! Playmatic built four generations of controller boards around the same
//! CDP1802 CPU, and none of them are interchangeable. The earliest boards
//! ran a rough 400 kHz R/C clock with the IRQ hard-wired to AC zero-cross
//! detection; the second generation moved to a 2.95 MHz clock chip with a
//! ~360 Hz IRQ cleared by software; the third kept those values but rewired
//! every output circuit; the fourth swapped in a generic 3.58 MHz NTSC
//! quartz.
//!
//! The boards are nitpicky about their timing signals. Generation 1 needs
//! an uneven distribution of IRQ assert/clear states (1 in 8), generation 2
//! and up clear the IRQ line from a port write and feed the CPU's Q output
//! back into the flag logic, and the power-on levels of the EF flag lines
//! matter too.
//!
//! # Scope
//!
//! This crate models the board's output side: the interrupt/flag state
//! machine, the port decode (displays, lamp matrix, solenoids, sound
//! commands), and the pending/visible double buffering committed once per
//! frame. The CPU interpreter, the sound boards' internals, and the switch
//! scan engine are collaborators behind narrow seams ([`SoundBoard`],
//! [`SwitchMatrix`], and the CPU-line accessors on [`PlaymaticMpu`]).
//!
//! # Signals
//!
//! - **EF1-EF4**: the four flag inputs the CPU polls. EF1 gates interrupt
//!   re-assertion, EF2 marks "interrupt acknowledged", EF3 toggles on each
//!   zero crossing and steers the lamp nibble, EF4 mirrors a dip switch or
//!   a switch-matrix bit depending on generation.
//! - **Q**: the CPU's single-bit status output, fed back into the flag
//!   logic and merged into solenoid 17 on generation 1.
//! - **SC**: control output gating whether display writes are honored.

mod config;
mod display;
mod irq;
mod lamps;
mod mpu;
mod ports;
mod sound;
mod switches;

pub use config::{Generation, SoundBoardKind};
pub use display::{DISPLAY_CELLS, DisplayMux};
pub use irq::InterruptScheduler;
pub use lamps::{LampSolenoidDriver, Q_SOLENOID_BIT};
pub use mpu::{CpuMode, PlaymaticMpu};
pub use sound::{NoSoundBoard, SoundBoard};
pub use switches::{StaticSwitchMatrix, SwitchMatrix};
