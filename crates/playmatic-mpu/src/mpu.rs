//! Top-level board assembly and CPU-line interface.

use crate::config::{Generation, SoundBoardKind};
use crate::display::{DISPLAY_CELLS, DisplayMux};
use crate::irq::InterruptScheduler;
use crate::lamps::LampSolenoidDriver;
use crate::sound::SoundBoard;
use crate::switches::SwitchMatrix;

/// CPU run/reset mode line.
///
/// Generation 2+ boards hold the CPU in reset until the first switch
/// refresh after power-on; generation 1 comes up running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuMode {
    Reset,
    Run,
}

/// One Playmatic MPU board.
///
/// Owns all mutable machine state for a session. The CPU interpreter calls
/// [`write_port`](Self::write_port) / [`read_port`](Self::read_port) between
/// instruction fetches and samples the line accessors; the host's timers
/// drive [`periodic_tick`](Self::periodic_tick),
/// [`zero_cross_tick`](Self::zero_cross_tick) and
/// [`frame_tick`](Self::frame_tick).
pub struct PlaymaticMpu {
    pub(crate) generation: Generation,
    pub(crate) sound_board: SoundBoardKind,
    pub(crate) sound: Box<dyn SoundBoard>,
    pub(crate) switches: Box<dyn SwitchMatrix>,
    pub(crate) irq: InterruptScheduler,
    pub(crate) display: DisplayMux,
    pub(crate) lamps: LampSolenoidDriver,
    /// CPU status output (Q).
    pub(crate) q: bool,
    /// CPU control output (SC); display data writes blank while low.
    pub(crate) sc: bool,
    /// Lamp column selector latch.
    pub(crate) lamp_col: u8,
    /// Data latch for the generation-1 two-write display protocol.
    pub(crate) data_latch: u8,
    /// Sound-enable flags from bits 4-7 of the last lamp-control byte.
    pub(crate) en_relay: bool,
    pub(crate) en_display: bool,
    pub(crate) en_sound: bool,
    pub(crate) en_aux: bool,
    /// Last command forwarded to the sound board.
    pub(crate) snd_cmd: u8,
    /// Set by the first switch refresh; gates the run/reset mode line.
    pub(crate) reset_done: bool,
}

impl PlaymaticMpu {
    #[must_use]
    pub fn new(
        generation: Generation,
        sound_board: SoundBoardKind,
        sound: Box<dyn SoundBoard>,
        switches: Box<dyn SwitchMatrix>,
    ) -> Self {
        Self {
            generation,
            sound_board,
            sound,
            switches,
            irq: InterruptScheduler::new(generation),
            display: DisplayMux::new(),
            lamps: LampSolenoidDriver::new(),
            q: false,
            sc: false,
            lamp_col: 0,
            data_latch: 0,
            en_relay: false,
            en_display: false,
            en_sound: false,
            en_aux: false,
            snd_cmd: 0,
            reset_done: generation.runs_at_power_on(),
        }
    }

    /// Periodic interrupt tick (rate per [`Generation::irq_interval_ticks`]).
    pub fn periodic_tick(&mut self) {
        self.irq.periodic_tick(self.q);
    }

    /// 100 Hz zero-cross tick. Not wired on generation 1.
    pub fn zero_cross_tick(&mut self) {
        if self.generation.has_zero_cross() {
            self.irq.zero_cross_tick();
        }
    }

    /// Frame boundary: commit pending lamp/solenoid state to the visible
    /// side, then refresh the switch inputs.
    pub fn frame_tick(&mut self) {
        match self.generation {
            Generation::Gen1 => self.lamps.commit_direct(self.q),
            _ => self.lamps.commit_alternating(),
        }
        self.refresh_switches();
    }

    /// Rescan the switch collaborator and apply the generation's flag
    /// wiring: generation 1 mirrors dip switches onto EF2-EF4, later
    /// generations mirror the inverted bit 0 of switch row 0 onto EF4 and
    /// release the CPU from reset.
    pub fn refresh_switches(&mut self) {
        self.switches.refresh();
        match self.generation {
            Generation::Gen1 => {
                let dips = self.switches.dips();
                self.irq.set_ef2(dips & 0x01 != 0);
                self.irq.set_ef3(dips & 0x02 != 0);
                self.irq.set_ef4(dips & 0x04 != 0);
            }
            _ => {
                self.irq.set_ef4(self.switches.row(0) & 0x01 == 0);
                self.reset_done = true;
            }
        }
    }

    /// The CPU's Q output changed level.
    pub fn set_q(&mut self, level: bool) {
        self.q = level;
        self.irq.q_changed(level);
    }

    /// The CPU's SC control output changed level.
    pub fn set_sc(&mut self, level: bool) {
        self.sc = level;
    }

    /// EF1-EF4 as the CPU samples them.
    #[must_use]
    pub fn ef_lines(&self) -> u8 {
        self.irq.ef_lines()
    }

    /// Interrupt request line level.
    #[must_use]
    pub fn irq_asserted(&self) -> bool {
        self.irq.irq_asserted()
    }

    /// Run/reset mode line.
    #[must_use]
    pub fn mode(&self) -> CpuMode {
        if self.reset_done {
            CpuMode::Run
        } else {
            CpuMode::Reset
        }
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Visible display segment buffer.
    #[must_use]
    pub fn segments(&self) -> &[u8; DISPLAY_CELLS] {
        self.display.segments()
    }

    /// Visible lamp matrix.
    #[must_use]
    pub fn lamps(&self) -> &[u8; 8] {
        self.lamps.lamps()
    }

    /// Visible solenoid word.
    #[must_use]
    pub fn solenoids(&self) -> u32 {
        self.lamps.solenoids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::NoSoundBoard;
    use crate::switches::StaticSwitchMatrix;

    fn mpu_with_rows(generation: Generation, rows: [u8; 8], dips: u8) -> PlaymaticMpu {
        PlaymaticMpu::new(
            generation,
            SoundBoardKind::FourTones,
            Box::new(NoSoundBoard),
            Box::new(StaticSwitchMatrix { rows, dips }),
        )
    }

    #[test]
    fn gen1_runs_at_power_on() {
        let mpu = mpu_with_rows(Generation::Gen1, [0; 8], 0);
        assert_eq!(mpu.mode(), CpuMode::Run);
    }

    #[test]
    fn later_boards_leave_reset_on_first_switch_refresh() {
        let mut mpu = mpu_with_rows(Generation::Gen3, [0; 8], 0);
        assert_eq!(mpu.mode(), CpuMode::Reset);
        mpu.frame_tick();
        assert_eq!(mpu.mode(), CpuMode::Run);
    }

    #[test]
    fn gen1_dips_mirror_onto_flags() {
        let mut mpu = mpu_with_rows(Generation::Gen1, [0; 8], 0b101);
        mpu.refresh_switches();
        // EF2 from dip 0, EF4 from dip 2; EF3 from dip 1 stays low
        assert_eq!(mpu.ef_lines(), 0x0A);
    }

    #[test]
    fn later_boards_mirror_inverted_row_bit_onto_ef4() {
        let mut mpu = mpu_with_rows(Generation::Gen2, [0x01, 0, 0, 0, 0, 0, 0, 0], 0);
        mpu.refresh_switches();
        assert_eq!(mpu.ef_lines() & 0x08, 0);

        let mut mpu = mpu_with_rows(Generation::Gen2, [0x00; 8], 0);
        mpu.refresh_switches();
        assert_eq!(mpu.ef_lines() & 0x08, 0x08);
    }

    #[test]
    fn zero_cross_not_wired_on_gen1() {
        let mut mpu = mpu_with_rows(Generation::Gen1, [0; 8], 0);
        mpu.zero_cross_tick();
        assert!(!mpu.irq_asserted());
        assert_eq!(mpu.ef_lines() & 0x04, 0);
    }
}
