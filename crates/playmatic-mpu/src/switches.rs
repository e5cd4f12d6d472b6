//! Switch-matrix seam.
//!
//! The scan/debounce engine lives outside this core. The MPU reads raw
//! row bytes on the input ports and kicks a refresh once per frame so the
//! collaborator can rescan whatever it mirrors into the rows.

/// Source of raw switch-matrix rows and dip switches.
pub trait SwitchMatrix {
    /// Current byte for the given matrix row (0-7).
    fn row(&self, row: usize) -> u8;
    /// First dip-switch bank (generation-1 boards mirror it onto EF2-EF4).
    fn dips(&self) -> u8;
    /// Once-per-frame refresh hook.
    fn refresh(&mut self);
}

/// Fixed switch state, pokeable from the host. Suitable for tests and for
/// hosts that update rows between frames.
#[derive(Default)]
pub struct StaticSwitchMatrix {
    pub rows: [u8; 8],
    pub dips: u8,
}

impl SwitchMatrix for StaticSwitchMatrix {
    fn row(&self, row: usize) -> u8 {
        self.rows.get(row).copied().unwrap_or(0)
    }

    fn dips(&self) -> u8 {
        self.dips
    }

    fn refresh(&mut self) {}
}
