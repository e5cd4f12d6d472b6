//! Master-clock tick loop.

use playmatic_mpu::{
    CpuMode, NoSoundBoard, PlaymaticMpu, SoundBoard, StaticSwitchMatrix, SwitchMatrix,
};

use crate::config::MachineConfig;

/// Zero-cross rate: AC line frequency doubled (both crossings), fixed at
/// 100 Hz on every board that has the detector.
pub const ZERO_CROSS_HZ: u64 = 100;

/// Frame commit rate.
pub const FRAME_RATE_HZ: u64 = 60;

/// One Playmatic machine: the MPU board plus its timing sources.
///
/// [`tick`](Self::tick) advances one master-clock cycle and fires whichever
/// periodic drivers fall due on that cycle, in a fixed order: interrupt
/// tick, zero-cross tick, frame tick. Port accesses and line changes from
/// the CPU collaborator go through [`mpu_mut`](Self::mpu_mut) between
/// ticks.
pub struct PlaymaticMachine {
    mpu: PlaymaticMpu,
    /// Master crystal tick counter.
    master_clock: u64,
    /// Master ticks per periodic interrupt tick.
    irq_interval: u64,
    /// Master ticks per zero crossing (generation 2 onward).
    zero_cross_interval: Option<u64>,
    /// Master ticks per frame commit.
    frame_interval: u64,
    /// Completed frame counter.
    frame_count: u64,
}

impl PlaymaticMachine {
    /// Create a machine with no sound board fitted and a pokeable static
    /// switch matrix.
    #[must_use]
    pub fn new(config: MachineConfig) -> Self {
        Self::with_collaborators(
            config,
            Box::new(NoSoundBoard),
            Box::new(StaticSwitchMatrix::default()),
        )
    }

    /// Create a machine wired to the given sound-board and switch-matrix
    /// collaborators.
    #[must_use]
    pub fn with_collaborators(
        config: MachineConfig,
        sound: Box<dyn SoundBoard>,
        switches: Box<dyn SwitchMatrix>,
    ) -> Self {
        let generation = config.generation;
        let clock = generation.clock_hz();
        Self {
            mpu: PlaymaticMpu::new(generation, config.sound_board, sound, switches),
            master_clock: 0,
            irq_interval: generation.irq_interval_ticks(),
            zero_cross_interval: generation
                .has_zero_cross()
                .then_some(clock / ZERO_CROSS_HZ),
            frame_interval: clock / FRAME_RATE_HZ,
            frame_count: 0,
        }
    }

    /// Advance one master-clock cycle.
    pub fn tick(&mut self) {
        self.master_clock += 1;
        if self.master_clock % self.irq_interval == 0 {
            self.mpu.periodic_tick();
        }
        if let Some(interval) = self.zero_cross_interval
            && self.master_clock % interval == 0
        {
            self.mpu.zero_cross_tick();
        }
        if self.master_clock % self.frame_interval == 0 {
            self.mpu.frame_tick();
            self.frame_count += 1;
        }
    }

    /// Run until the next frame commit completes.
    pub fn run_frame(&mut self) {
        let target = self.frame_count + 1;
        while self.frame_count < target {
            self.tick();
        }
    }

    /// Run/reset mode line as the CPU samples it.
    #[must_use]
    pub fn mode(&self) -> CpuMode {
        self.mpu.mode()
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The MPU board, for port access and line feedback from the CPU.
    #[must_use]
    pub fn mpu(&self) -> &PlaymaticMpu {
        &self.mpu
    }

    pub fn mpu_mut(&mut self) -> &mut PlaymaticMpu {
        &mut self.mpu
    }

    /// Master ticks between periodic interrupt ticks.
    #[must_use]
    pub fn irq_interval(&self) -> u64 {
        self.irq_interval
    }

    /// Master ticks between zero crossings, if wired.
    #[must_use]
    pub fn zero_cross_interval(&self) -> Option<u64> {
        self.zero_cross_interval
    }

    /// Master ticks between frame commits.
    #[must_use]
    pub fn frame_interval(&self) -> u64 {
        self.frame_interval
    }
}
