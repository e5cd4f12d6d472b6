//! Sound-board command seam.
//!
//! The sound boards' internals (tone circuits, AY8910s, the TMS5220, the
//! second CDP1802) are out of scope; the MPU only ever pushes a data byte
//! and a control/strobe byte across the board connector. Which byte goes
//! where is decided by the decoder per [`crate::SoundBoardKind`].

/// Receiving end of the sound-board connector.
pub trait SoundBoard {
    /// Command/data byte write.
    fn write_data(&mut self, data: u8);
    /// Control or strobe write.
    fn write_ctrl(&mut self, data: u8);
}

/// No sound board fitted; commands are dropped.
pub struct NoSoundBoard;

impl SoundBoard for NoSoundBoard {
    fn write_data(&mut self, _data: u8) {}
    fn write_ctrl(&mut self, _data: u8) {}
}
