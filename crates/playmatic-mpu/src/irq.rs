//! Interrupt and flag-line state machine.
//!
//! The CPU has a single interrupt input and four external flag inputs
//! (EF1-EF4). How they are driven changed with every board generation:
//!
//! - Generation 1 hard-wires the IRQ to the periodic tick through a mod-8
//!   divider. The line is asserted on exactly one of every eight ticks and
//!   cleared on the other seven; EF1 toggles only on the asserting tick.
//!   The lopsided distribution is load-bearing — the game ROMs fail to
//!   scan switches if the assert/clear ratio is evened out.
//! - Generation 2 onward toggles EF1 on every periodic tick unless the
//!   CPU's Q output is high, which holds EF1 low (Q is wired to the reset
//!   pin of flip-flop U2). The separate 100 Hz zero-cross tick toggles EF3
//!   and, while EF1 is low, asserts the IRQ line and drops EF2. Firmware
//!   acknowledges from a lamp-channel port write, which clears the line
//!   and raises EF2.

use crate::config::Generation;

/// Drives the CPU's interrupt line and the EF1-EF3 flags.
///
/// EF4 is not timing-driven — it mirrors a dip switch or a switch-matrix
/// bit and is set from the switch refresh path.
pub struct InterruptScheduler {
    generation: Generation,
    /// Rolling periodic-tick counter (mod 8, generation 1 only).
    tick_count: u8,
    /// EF1-EF4 levels, index 0 = EF1.
    ef: [bool; 4],
    /// Interrupt line level.
    irq: bool,
}

impl InterruptScheduler {
    #[must_use]
    pub fn new(generation: Generation) -> Self {
        Self {
            generation,
            tick_count: 0,
            ef: [false, false, generation.ef3_power_on_high(), false],
            irq: false,
        }
    }

    /// Periodic interrupt tick.
    ///
    /// `q` is the current level of the CPU's status output; it is ignored
    /// on generation 1.
    pub fn periodic_tick(&mut self, q: bool) {
        match self.generation {
            Generation::Gen1 => {
                self.tick_count = (self.tick_count + 1) % 8;
                self.irq = self.tick_count == 0;
                if self.tick_count == 0 {
                    self.ef[0] = !self.ef[0];
                }
            }
            _ => {
                if q {
                    self.ef[0] = false;
                } else {
                    self.ef[0] = !self.ef[0];
                }
            }
        }
    }

    /// 100 Hz zero-cross tick (generation 2 onward).
    ///
    /// Toggles EF3 on every crossing; while EF1 is low it also asserts the
    /// interrupt line and drops the acknowledge flag EF2.
    pub fn zero_cross_tick(&mut self) {
        self.ef[2] = !self.ef[2];
        if !self.ef[0] {
            self.irq = true;
            self.ef[1] = false;
        }
    }

    /// The CPU's Q output changed level.
    ///
    /// On generation 2 onward a high Q resets the EF1 flip-flop.
    pub fn q_changed(&mut self, level: bool) {
        if self.generation != Generation::Gen1 && level {
            self.ef[0] = false;
        }
    }

    /// Firmware interrupt acknowledge: clear the line, raise EF2.
    ///
    /// Invoked by the decoder as a side effect of every lamp-channel write.
    pub fn acknowledge(&mut self) {
        self.irq = false;
        self.ef[1] = true;
    }

    /// Combined flag nibble as the CPU samples it:
    /// EF1 | EF2 << 1 | EF3 << 2 | EF4 << 3.
    #[must_use]
    pub fn ef_lines(&self) -> u8 {
        u8::from(self.ef[0])
            | u8::from(self.ef[1]) << 1
            | u8::from(self.ef[2]) << 2
            | u8::from(self.ef[3]) << 3
    }

    /// Current interrupt line level.
    #[must_use]
    pub fn irq_asserted(&self) -> bool {
        self.irq
    }

    /// EF1 level (lamp-row select on generation 1 boards).
    #[must_use]
    pub fn ef1(&self) -> bool {
        self.ef[0]
    }

    /// EF3 level (lamp nibble select on generation 2 onward).
    #[must_use]
    pub fn ef3(&self) -> bool {
        self.ef[2]
    }

    /// Set EF2 directly (generation-1 dip switch).
    pub(crate) fn set_ef2(&mut self, level: bool) {
        self.ef[1] = level;
    }

    /// Set EF3 directly (generation-1 dip switch).
    pub(crate) fn set_ef3(&mut self, level: bool) {
        self.ef[2] = level;
    }

    /// Set EF4 directly (dip switch or switch-matrix mirror).
    pub(crate) fn set_ef4(&mut self, level: bool) {
        self.ef[3] = level;
    }
}
