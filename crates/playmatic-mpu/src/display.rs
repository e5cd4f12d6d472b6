//! Display multiplexer and segment buffer.
//!
//! Generation 1 drives six-digit panels with some digits shared between
//! players; generation 2 onward drives five rows of 7-segment LED panels
//! with direct segment access. Either way the firmware multiplexes one
//! data port into dozens of digit cells through a column-select latch.
//!
//! # Cell layout
//!
//! Cells 0-47 are digit positions (eight per panel row on later boards);
//! cells 48-55 hold the comma digits derived from bit 7 of a data write.

/// Total display cells: 48 digit cells plus 8 comma cells.
pub const DISPLAY_CELLS: usize = 56;

/// BCD digit to 7-segment pattern (abcdefg, bit 0 = segment a).
/// Non-BCD values render blank.
pub(crate) const BCD2SEG7: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, // 0-7
    0x7F, 0x6F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 8-9, rest blank
];

/// Stateful digit/panel selection plus the segment buffer it routes into.
///
/// `digit_sel` is set only by a column-select write; `panel_sel` increments
/// only on data writes and resets only on an all-zero column select. No
/// validation is applied to the selectors themselves — out-of-range values
/// are a real hardware "don't care" state, and a write they produce is
/// simply dropped.
pub struct DisplayMux {
    digit_sel: u8,
    panel_sel: u8,
    segments: [u8; DISPLAY_CELLS],
}

impl DisplayMux {
    #[must_use]
    pub fn new() -> Self {
        Self {
            digit_sel: 0,
            panel_sel: 0,
            segments: [0; DISPLAY_CELLS],
        }
    }

    /// Column-select write (generation 2 onward).
    ///
    /// An all-zero low 7 bits resets the panel counter; otherwise the digit
    /// selector becomes the position of the highest set bit (the original
    /// board scanned the column byte low to high, last match winning).
    pub fn select_column(&mut self, data: u8) {
        if data & 0x7F == 0 {
            self.panel_sel = 0;
        } else {
            self.digit_sel = 7 - (data & 0x7F).leading_zeros() as u8;
        }
    }

    /// Data write (generation 2 onward): store the segment byte at
    /// `8 * panel + digit`, blanked when SC is low, then advance the panel
    /// counter. Bit 7 drives the panel's comma cell.
    pub fn write_data(&mut self, data: u8, sc: bool) {
        let cell = usize::from(self.panel_sel) * 8 + usize::from(self.digit_sel);
        let byte = if sc { data } else { 0 };
        self.write_cell(cell, byte & 0x7F);
        let comma = if byte & 0x80 != 0 { BCD2SEG7[0] } else { 0 };
        self.write_cell(48 + cell / 8, comma);
        self.panel_sel = self.panel_sel.wrapping_add(1);
    }

    /// Store a segment pattern directly (generation-1 display wiring).
    pub fn write_cell(&mut self, cell: usize, pattern: u8) {
        if let Some(slot) = self.segments.get_mut(cell) {
            *slot = pattern;
        } else {
            log::trace!("segment write out of range: cell {cell}");
        }
    }

    /// OR segments into a cell (comma bits on generation-1 score panels).
    pub fn or_cell(&mut self, cell: usize, pattern: u8) {
        if let Some(slot) = self.segments.get_mut(cell) {
            *slot |= pattern;
        }
    }

    pub fn set_digit_sel(&mut self, sel: u8) {
        self.digit_sel = sel;
    }

    #[must_use]
    pub fn digit_sel(&self) -> u8 {
        self.digit_sel
    }

    #[must_use]
    pub fn segments(&self) -> &[u8; DISPLAY_CELLS] {
        &self.segments
    }
}

impl Default for DisplayMux {
    fn default() -> Self {
        Self::new()
    }
}
