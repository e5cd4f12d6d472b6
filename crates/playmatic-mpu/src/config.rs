//! Board generation and sound-board selection.
//!
//! The generation is picked once at construction and is the sole selector
//! of clock rate, interrupt wiring, port mapping, and power-on flag levels.

/// The four Playmatic MPU hardware generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// ~400 kHz R/C clock, IRQ hard-wired to zero-cross detection.
    Gen1,
    /// 2.95 MHz clock chip, ~360 Hz IRQ cleared by port write.
    Gen2,
    /// Same clock as generation 2 with all output circuits rewired.
    Gen3,
    /// Generic 3.58 MHz NTSC quartz, otherwise like generation 3.
    Gen4,
}

impl Generation {
    /// Generation id (0-3), the `cpuType` of the original boards.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Gen1 => 0,
            Self::Gen2 => 1,
            Self::Gen3 => 2,
            Self::Gen4 => 3,
        }
    }

    /// CPU clock frequency in Hz.
    #[must_use]
    pub const fn clock_hz(self) -> u64 {
        match self {
            Self::Gen1 => 400_000,
            Self::Gen2 | Self::Gen3 => 2_950_000,
            Self::Gen4 => 3_579_545,
        }
    }

    /// Clock ticks between periodic interrupt ticks.
    ///
    /// Generation 1 fires at 800 Hz — nominally the 100 Hz zero-cross
    /// frequency, but the board needs the uneven mod-8 assert/clear
    /// distribution, so the tick runs at 8x and the scheduler divides.
    /// Later generations divide the CPU clock by 8192 (~360 Hz).
    #[must_use]
    pub const fn irq_interval_ticks(self) -> u64 {
        match self {
            Self::Gen1 => 400_000 / 800,
            _ => 8192,
        }
    }

    /// Whether the board has the separate 100 Hz zero-cross tick
    /// (generation 2 onward).
    #[must_use]
    pub const fn has_zero_cross(self) -> bool {
        !matches!(self, Self::Gen1)
    }

    /// Power-on level of the EF3 line (high from generation 2 onward).
    #[must_use]
    pub const fn ef3_power_on_high(self) -> bool {
        !matches!(self, Self::Gen1)
    }

    /// Whether the run/reset latch is already set at power-on.
    ///
    /// Generation 1 boards come up running; later boards stay in reset
    /// until the first switch-matrix refresh.
    #[must_use]
    pub const fn runs_at_power_on(self) -> bool {
        matches!(self, Self::Gen1)
    }
}

/// Sound hardware fitted to the machine.
///
/// Sound started out with four simple tones and evolved through a
/// CPU-driven oscillator on to complete boards with their own CPU. Each
/// board is wired differently into the lamp-control write, so the decoder
/// branches on this kind rather than on generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundBoardKind {
    /// Generation-1 discrete four-tone circuit.
    FourTones,
    /// Simple tone generator with frequency divider (fading on the display
    /// column's top bit).
    ToneGenerator,
    /// ZIRA: tone generator plus a COP402 with an AY8910.
    Zira,
    /// Tone generator plus a second CDP1802 with a TMS5220 speech chip.
    Speech,
    /// Full sound board: CDP1802 at NTSC clock with two AY8910s,
    /// active-low command strobe.
    SoundCpu,
}
