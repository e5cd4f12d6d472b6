//! Per-generation memory layout.
//!
//! The boards moved their ROM, scratch RAM, and battery-backed NVRAM around
//! with every generation. This core does not interpret any of it — the
//! ranges are declared here as data for the memory-map collaborator, which
//! owns the actual bytes and their persistence.

/// Inclusive address range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRange {
    pub start: u16,
    pub end: u16,
}

impl MemoryRange {
    #[must_use]
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end as usize - self.start as usize + 1
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end < self.start
    }
}

/// ROM, RAM, and NVRAM placement for one board generation.
#[derive(Debug, Clone, Copy)]
pub struct MemoryMap {
    pub rom: &'static [MemoryRange],
    pub ram: &'static [MemoryRange],
    /// Battery-backed range; a subset of `ram`.
    pub nvram: MemoryRange,
}

const GEN1_MAP: MemoryMap = MemoryMap {
    rom: &[MemoryRange::new(0x0000, 0x07FF)],
    ram: &[
        MemoryRange::new(0x0800, 0x081F),
        MemoryRange::new(0x0C00, 0x0C1F),
    ],
    nvram: MemoryRange::new(0x0800, 0x081F),
};

/// Late generation-1 boards with a larger ROM and relocated NVRAM.
pub const GEN1_EXTENDED_MAP: MemoryMap = MemoryMap {
    rom: &[MemoryRange::new(0x0000, 0x09FF)],
    ram: &[
        MemoryRange::new(0x0C00, 0x0C1F),
        MemoryRange::new(0x0E00, 0x0E1F),
    ],
    nvram: MemoryRange::new(0x0E00, 0x0E1F),
};

const GEN2_MAP: MemoryMap = MemoryMap {
    rom: &[
        MemoryRange::new(0x0000, 0x1FFF),
        MemoryRange::new(0xA000, 0xAFFF),
    ],
    ram: &[MemoryRange::new(0x2000, 0x20FF)],
    nvram: MemoryRange::new(0x2000, 0x20FF),
};

const GEN3_MAP: MemoryMap = MemoryMap {
    rom: &[MemoryRange::new(0x0000, 0x7FFF)],
    ram: &[MemoryRange::new(0x8000, 0x80FF)],
    nvram: MemoryRange::new(0x8000, 0x80FF),
};

/// Standard memory layout for a generation. Generations 3 and 4 share one.
#[must_use]
pub fn memory_map(generation: playmatic_mpu::Generation) -> MemoryMap {
    use playmatic_mpu::Generation;
    match generation {
        Generation::Gen1 => GEN1_MAP,
        Generation::Gen2 => GEN2_MAP,
        Generation::Gen3 | Generation::Gen4 => GEN3_MAP,
    }
}
