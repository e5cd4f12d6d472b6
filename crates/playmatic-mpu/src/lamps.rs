//! Lamp matrix and solenoid double buffering.
//!
//! Port decode never touches what the machine actually shows. Writes land
//! in a pending lamp matrix and a pending solenoid accumulator, and a
//! once-per-frame commit swaps them into the visible side:
//!
//! - Generation 1 copies the lamp matrix every frame and rebuilds the
//!   visible solenoid word from the pending byte plus the CPU's Q output
//!   in bit 16.
//! - Generation 2 onward copies the lamp matrix every frame but commits
//!   the solenoid accumulator only every second frame, clearing the
//!   accumulator so briefly pulsed coils still register for a full period.

/// Solenoid word bit driven directly by the CPU's Q line (generation 1).
pub const Q_SOLENOID_BIT: u32 = 1 << 16;

/// Pending/visible lamp and solenoid state.
pub struct LampSolenoidDriver {
    pending_lamps: [u8; 8],
    lamps: [u8; 8],
    pending_solenoids: u32,
    solenoids: u32,
    /// Frame parity for the every-second-frame solenoid commit.
    odd_frame: bool,
}

impl LampSolenoidDriver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending_lamps: [0; 8],
            lamps: [0; 8],
            pending_solenoids: 0,
            solenoids: 0,
            odd_frame: false,
        }
    }

    /// Replace a whole pending lamp row (generation-1 direct row wiring).
    pub fn write_lamp_row(&mut self, row: usize, data: u8) {
        if let Some(slot) = self.pending_lamps.get_mut(row) {
            *slot = data;
        } else {
            log::trace!("lamp row out of range: {row}");
        }
    }

    /// Merge a 4-bit lamp value into a pending column, steered into the
    /// low or high nibble by the EF3 level.
    pub fn merge_lamp_nibble(&mut self, col: usize, nibble: u8, high: bool) {
        let Some(slot) = self.pending_lamps.get_mut(col) else {
            log::trace!("lamp column out of range: {col}");
            return;
        };
        if high {
            *slot = (*slot & 0x0F) | (nibble << 4);
        } else {
            *slot = (*slot & 0xF0) | (nibble & 0x0F);
        }
    }

    /// OR a bit into the pending solenoid accumulator.
    pub fn or_solenoid(&mut self, bit: u32) {
        self.pending_solenoids |= bit;
    }

    /// Replace the pending solenoid byte (generation-1 solenoid latch).
    pub fn set_solenoid_byte(&mut self, data: u8) {
        self.pending_solenoids = u32::from(data);
    }

    /// Generation-1 frame commit: lamps copied, visible solenoid word
    /// rebuilt from the pending byte with Q merged into bit 16.
    pub fn commit_direct(&mut self, q: bool) {
        self.lamps = self.pending_lamps;
        self.solenoids = (self.pending_solenoids & 0xFFFF) | if q { Q_SOLENOID_BIT } else { 0 };
    }

    /// Generation-2+ frame commit: lamps copied every frame, solenoid
    /// accumulator committed and cleared every second frame.
    pub fn commit_alternating(&mut self) {
        self.lamps = self.pending_lamps;
        self.odd_frame = !self.odd_frame;
        if !self.odd_frame {
            self.solenoids = self.pending_solenoids;
            self.pending_solenoids = 0;
        }
    }

    /// Visible lamp matrix, one byte per column.
    #[must_use]
    pub fn lamps(&self) -> &[u8; 8] {
        &self.lamps
    }

    /// Visible solenoid word.
    #[must_use]
    pub fn solenoids(&self) -> u32 {
        self.solenoids
    }

    #[cfg(test)]
    pub(crate) fn pending_lamps(&self) -> &[u8; 8] {
        &self.pending_lamps
    }

    #[cfg(test)]
    pub(crate) fn pending_solenoids(&self) -> u32 {
        self.pending_solenoids
    }
}

impl Default for LampSolenoidDriver {
    fn default() -> Self {
        Self::new()
    }
}
