//! Machine configuration.

use playmatic_mpu::{Generation, SoundBoardKind};

/// Configuration for creating a Playmatic machine.
///
/// The generation and sound board are fixed for the lifetime of a session;
/// every mapping table and flag-toggle rule follows from them.
#[derive(Debug, Clone, Copy)]
pub struct MachineConfig {
    pub generation: Generation,
    pub sound_board: SoundBoardKind,
}

impl MachineConfig {
    /// Typical board pairing for each generation: four tones on the first
    /// boards, the tone generator on the second, speech on the third, the
    /// full sound CPU on the fourth.
    #[must_use]
    pub fn standard(generation: Generation) -> Self {
        let sound_board = match generation {
            Generation::Gen1 => SoundBoardKind::FourTones,
            Generation::Gen2 => SoundBoardKind::ToneGenerator,
            Generation::Gen3 => SoundBoardKind::Speech,
            Generation::Gen4 => SoundBoardKind::SoundCpu,
        };
        Self {
            generation,
            sound_board,
        }
    }
}
