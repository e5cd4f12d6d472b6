//! Playmatic machine assembly.
//!
//! Wires a [`playmatic_mpu::PlaymaticMpu`] board core to a master clock.
//! Everything ticks at the generation's CPU crystal frequency; the three
//! periodic drivers (interrupt tick, 100 Hz zero-cross tick, frame tick)
//! are derived by integer division, the same way the real boards divided
//! their clock chip.
//!
//! The CPU interpreter is an external collaborator: hosts interleave
//! [`PlaymaticMachine::tick`] with instruction execution and route port
//! accesses through the MPU accessors.

mod config;
mod machine;
mod memory;

pub use config::MachineConfig;
pub use machine::{FRAME_RATE_HZ, PlaymaticMachine, ZERO_CROSS_HZ};
pub use memory::{GEN1_EXTENDED_MAP, MemoryMap, MemoryRange, memory_map};
