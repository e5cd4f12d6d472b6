//! I/O port decode.
//!
//! Eight output ports and eight input ports, addressed 0-7. The same port
//! offset means different devices depending on generation: generations 1-2
//! share one ordering, generations 3-4 rewired the output circuits and
//! shuffled the channels. Generation 1 additionally has its own dedicated
//! port wiring (six-digit panels, direct lamp rows keyed by EF1) that never
//! went through the channel table at all.
//!
//! Undefined accesses — unmapped ports, selector values past the valid
//! range — are logged and ignored. Real hardware had no fault path for
//! these states and the emulation must not invent one.

use crate::config::{Generation, SoundBoardKind};
use crate::display::BCD2SEG7;
use crate::mpu::PlaymaticMpu;

/// Semantic channel behind an output or input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    DisplayColumn,
    DisplayData,
    Sound,
    SwitchRead,
    DiagRead,
    LampColumn,
    LampData,
}

/// Port 1-7 channel assignment per generation. Generations 3-4 moved the
/// lamp circuits up front and the display/sound circuits to the top.
const CHANNELS: [[Channel; 7]; 4] = {
    use Channel::{DiagRead, DisplayColumn, DisplayData, LampColumn, LampData, Sound, SwitchRead};
    let early = [
        DisplayColumn,
        DisplayData,
        Sound,
        SwitchRead,
        DiagRead,
        LampColumn,
        LampData,
    ];
    let late = [
        DisplayColumn,
        LampColumn,
        LampData,
        SwitchRead,
        DiagRead,
        DisplayData,
        Sound,
    ];
    [early, early, late, late]
};

fn channel_for(generation: Generation, port: u8) -> Option<Channel> {
    if (1..=7).contains(&port) {
        Some(CHANNELS[usize::from(generation.id())][usize::from(port - 1)])
    } else {
        None
    }
}

impl PlaymaticMpu {
    /// Output port write from the CPU.
    pub fn write_port(&mut self, port: u8, data: u8) {
        log::trace!("out {port}: {data:02x}");
        match self.generation {
            Generation::Gen1 => self.write_port_gen1(port, data),
            _ => self.write_port_mapped(port, data),
        }
    }

    /// Input port read from the CPU.
    pub fn read_port(&mut self, port: u8) -> u8 {
        match self.generation {
            Generation::Gen1 => {
                // Direct row reads; the top rows come back inverted.
                let data = self.switches.row(usize::from(port & 0x07));
                if port & 0x07 > 5 { !data } else { data }
            }
            _ => self.read_port_mapped(port),
        }
    }

    /// Generation-1 output wiring: six-digit panels with shared digits,
    /// a two-write display protocol through a data latch, and lamp rows
    /// selected by the EF1 level.
    fn write_port_gen1(&mut self, port: u8, data: u8) {
        let row = usize::from(self.irq.ef1());
        match port {
            1 => {
                // Match & credits displays
                let one = if data & 0x01 != 0 { BCD2SEG7[1] } else { 0 };
                let zero = if data & 0x02 != 0 { BCD2SEG7[0] } else { 0 };
                self.display.write_cell(18, one);
                self.display
                    .write_cell(20 - row, BCD2SEG7[usize::from(data >> 4)]);
                self.display.write_cell(21, zero);
                self.display.write_cell(22, zero);
            }
            2 => self.data_latch = data,
            3 => {
                let sel = data ^ 0x0F;
                self.display.set_digit_sel(sel);
                if sel > 1 {
                    // Score displays: two BCD digits per write
                    let base = (usize::from(sel) - 2) * 2;
                    self.display
                        .write_cell(base, BCD2SEG7[usize::from(self.data_latch >> 4)]);
                    self.display
                        .write_cell(base + 1, BCD2SEG7[usize::from(self.data_latch & 0x0F)]);
                    for cell in [2, 8, 12, 16] {
                        self.display.or_cell(cell, 0x80);
                    }
                } else if sel == 1 {
                    // Sound command & player-up lights
                    self.sound.write_data(self.data_latch);
                    self.lamps
                        .write_lamp_row(6, (1u8 << (self.data_latch >> 5)) >> 1);
                } else {
                    // Solenoid byte
                    self.lamps.set_solenoid_byte(self.data_latch);
                }
            }
            4 => self.lamps.write_lamp_row(row, data),
            5 => self.lamps.write_lamp_row(row + 2, data),
            6 => self.lamps.write_lamp_row(row + 4, data),
            _ => log::warn!("unmapped output port {port} write: {data:02x}"),
        }
    }

    /// Generation-2+ output write through the channel table.
    fn write_port_mapped(&mut self, port: u8, data: u8) {
        let Some(channel) = channel_for(self.generation, port) else {
            log::warn!("unmapped output port {port} write: {data:02x}");
            return;
        };
        match channel {
            Channel::DisplayColumn => {
                if self.sound_board == SoundBoardKind::ToneGenerator {
                    // Top bit fades the sound out
                    self.sound.write_ctrl(data >> 7);
                }
                self.display.select_column(data);
            }
            Channel::DisplayData => self.display.write_data(data, self.sc),
            Channel::Sound => {
                if self.sound_board == SoundBoardKind::ToneGenerator {
                    self.sound.write_data(data);
                }
            }
            Channel::LampColumn => self.lamp_col = data,
            Channel::LampData => self.write_lamp_data(data),
            Channel::SwitchRead | Channel::DiagRead => {
                log::warn!("write to input channel, port {port}: {data:02x}");
            }
        }
    }

    /// Lamp-data channel write: the densest decode on the board.
    ///
    /// The low nibble is lamp data (inverted, active low); bits 4-7 latch
    /// the sound-enable flags. The nibble lands in the pending lamp column
    /// picked by the lamp-column latch, steered by EF3, when the
    /// generation's enable flag allows it. Bits 3-4 of the column latch
    /// pull solenoids in the two banks. The same write carries the sound
    /// command for the later boards and always acknowledges the interrupt.
    fn write_lamp_data(&mut self, data: u8) {
        let col = usize::from(self.lamp_col & 0x07);
        self.en_relay = data & 0x10 != 0;
        self.en_display = data & 0x20 != 0;
        self.en_sound = data & 0x40 != 0;
        self.en_aux = data & 0x80 != 0;
        let nibble = (data & 0x0F) ^ 0x0F;
        let enabled = if self.generation.id() < 2 {
            !self.en_aux
        } else {
            !self.en_relay
        };
        if enabled {
            self.lamps.merge_lamp_nibble(col, nibble, self.irq.ef3());
            if self.lamp_col & 0x08 != 0 {
                self.lamps.or_solenoid(1 << col);
            }
            if self.lamp_col & 0x10 != 0 {
                self.lamps.or_solenoid(0x100 << col);
            }
        }
        match self.sound_board {
            SoundBoardKind::Zira | SoundBoardKind::Speech => {
                // Top three enable bits go out as a control code
                self.snd_cmd = data & 0x70;
                self.sound.write_ctrl(self.snd_cmd);
            }
            SoundBoardKind::SoundCpu if !self.en_sound => {
                // Active-low strobe: column latch as data, enable as strobe
                self.snd_cmd = self.lamp_col;
                self.sound.write_data(self.snd_cmd);
                self.sound.write_ctrl(u8::from(self.en_sound));
            }
            _ => {}
        }
        self.irq.acknowledge();
    }

    /// Generation-2+ input read through the channel table.
    fn read_port_mapped(&mut self, port: u8) -> u8 {
        match channel_for(self.generation, port) {
            Some(Channel::SwitchRead) => {
                let sel = usize::from(self.display.digit_sel());
                if sel < 6 {
                    self.switches.row(sel + 2)
                } else {
                    log::warn!("switch read with digit selector {sel}");
                    0
                }
            }
            Some(Channel::DiagRead) => {
                if self.generation.id() > 1 {
                    let row = usize::from(self.display.digit_sel() != 1);
                    self.switches.row(row) ^ 0x0F
                } else {
                    !self.switches.row(1)
                }
            }
            _ => {
                log::warn!("unknown input port {port} read");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::lamps::Q_SOLENOID_BIT;
    use crate::sound::{NoSoundBoard, SoundBoard};
    use crate::switches::{StaticSwitchMatrix, SwitchMatrix};

    /// Records the (data/ctrl, byte) stream pushed across the connector.
    #[derive(Clone, Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<(char, u8)>>>,
    }

    impl SoundBoard for Recorder {
        fn write_data(&mut self, data: u8) {
            self.events.borrow_mut().push(('d', data));
        }
        fn write_ctrl(&mut self, data: u8) {
            self.events.borrow_mut().push(('c', data));
        }
    }

    /// Switch state shared between the test and the board.
    #[derive(Clone, Default)]
    struct SharedSwitches {
        state: Rc<RefCell<StaticSwitchMatrix>>,
    }

    impl SwitchMatrix for SharedSwitches {
        fn row(&self, row: usize) -> u8 {
            self.state.borrow().row(row)
        }
        fn dips(&self) -> u8 {
            self.state.borrow().dips()
        }
        fn refresh(&mut self) {}
    }

    fn mpu(generation: Generation, sound_board: SoundBoardKind) -> (PlaymaticMpu, Recorder) {
        let recorder = Recorder::default();
        let mpu = PlaymaticMpu::new(
            generation,
            sound_board,
            Box::new(recorder.clone()),
            Box::new(StaticSwitchMatrix::default()),
        );
        (mpu, recorder)
    }

    fn mpu_with_switches(
        generation: Generation,
    ) -> (PlaymaticMpu, Rc<RefCell<StaticSwitchMatrix>>) {
        let shared = SharedSwitches::default();
        let state = Rc::clone(&shared.state);
        let mpu = PlaymaticMpu::new(
            generation,
            SoundBoardKind::ToneGenerator,
            Box::new(NoSoundBoard),
            Box::new(shared),
        );
        (mpu, state)
    }

    #[test]
    fn channel_table_moves_lamps_on_later_boards() {
        assert_eq!(channel_for(Generation::Gen2, 7), Some(Channel::LampData));
        assert_eq!(channel_for(Generation::Gen3, 3), Some(Channel::LampData));
        assert_eq!(channel_for(Generation::Gen3, 7), Some(Channel::Sound));
        assert_eq!(channel_for(Generation::Gen4, 0), None);
        assert_eq!(channel_for(Generation::Gen4, 8), None);
    }

    #[test]
    fn lamp_write_inverts_nibble_into_selected_column() {
        let (mut mpu, _) = self::mpu(Generation::Gen2, SoundBoardKind::ToneGenerator);
        mpu.zero_cross_tick(); // EF3 powers on high; bring it low
        mpu.write_port(6, 0x03); // lamp column 3
        mpu.write_port(7, 0x05); // lamp data, enables clear
        assert_eq!(mpu.lamps.pending_lamps()[3], 0x0A);
        // High nibble untouched until EF3 flips
        mpu.zero_cross_tick();
        mpu.write_port(7, 0x00);
        assert_eq!(mpu.lamps.pending_lamps()[3], 0xFA);
    }

    #[test]
    fn lamp_write_disabled_by_enable_flag() {
        // Generations 1-2 gate on bit 7, generations 3-4 on bit 4.
        let (mut mpu, _) = self::mpu(Generation::Gen2, SoundBoardKind::ToneGenerator);
        mpu.write_port(6, 0x02);
        mpu.write_port(7, 0x85); // bit 7 set: no lamp effect
        assert_eq!(mpu.lamps.pending_lamps()[2], 0);

        let (mut mpu, _) = self::mpu(Generation::Gen3, SoundBoardKind::Speech);
        mpu.write_port(2, 0x02);
        mpu.write_port(3, 0x15); // bit 4 set: no lamp effect
        assert_eq!(mpu.lamps.pending_lamps()[2], 0);
        mpu.write_port(3, 0x85); // bit 7 means nothing here
        // EF3 is high at power-on, so the nibble lands in the high half
        assert_eq!(mpu.lamps.pending_lamps()[2], 0xA0);
    }

    #[test]
    fn lamp_column_bits_pull_solenoid_banks() {
        let (mut mpu, _) = self::mpu(Generation::Gen2, SoundBoardKind::ToneGenerator);
        mpu.write_port(6, 0x08 | 0x03); // bank A at column 3
        mpu.write_port(7, 0x00);
        assert_eq!(mpu.lamps.pending_solenoids(), 1 << 3);
        mpu.write_port(6, 0x10 | 0x05); // bank B at column 5
        mpu.write_port(7, 0x00);
        assert_eq!(mpu.lamps.pending_solenoids(), 1 << 3 | 0x100 << 5);

        // Visible only on the even commit frame
        mpu.frame_tick();
        assert_eq!(mpu.solenoids(), 0);
        mpu.frame_tick();
        assert_eq!(mpu.solenoids(), 1 << 3 | 0x100 << 5);
    }

    #[test]
    fn lamp_write_acknowledges_interrupt() {
        let (mut mpu, _) = self::mpu(Generation::Gen2, SoundBoardKind::ToneGenerator);
        mpu.zero_cross_tick(); // EF1 low -> asserts
        assert!(mpu.irq_asserted());
        mpu.write_port(7, 0x00);
        assert!(!mpu.irq_asserted());
        assert_eq!(mpu.ef_lines() & 0x02, 0x02); // EF2 raised
    }

    #[test]
    fn display_column_and_data_path() {
        let (mut mpu, _) = self::mpu(Generation::Gen3, SoundBoardKind::Speech);
        mpu.set_sc(true);
        mpu.write_port(1, 0x02); // digit 1
        mpu.write_port(6, 0x5B);
        mpu.write_port(6, 0x4F);
        assert_eq!(mpu.segments()[1], 0x5B); // 8*0 + 1
        assert_eq!(mpu.segments()[9], 0x4F); // 8*1 + 1
        mpu.write_port(1, 0x00); // reset panel counter
        mpu.write_port(6, 0x66);
        assert_eq!(mpu.segments()[1], 0x66);
    }

    #[test]
    fn display_writes_blank_while_sc_low() {
        let (mut mpu, _) = self::mpu(Generation::Gen2, SoundBoardKind::ToneGenerator);
        mpu.set_sc(true);
        mpu.write_port(1, 0x01);
        mpu.write_port(2, 0x7F);
        assert_eq!(mpu.segments()[0], 0x7F);
        mpu.set_sc(false);
        mpu.write_port(1, 0x00); // panel back to 0
        mpu.write_port(2, 0x7F);
        assert_eq!(mpu.segments()[0], 0); // blanked, not stored
    }

    #[test]
    fn tone_generator_fade_and_data() {
        let (mut mpu, recorder) = self::mpu(Generation::Gen2, SoundBoardKind::ToneGenerator);
        mpu.write_port(1, 0x84); // column select, top bit = fade
        mpu.write_port(3, 0x21); // sound channel
        assert_eq!(*recorder.events.borrow(), vec![('c', 1), ('d', 0x21)]);
    }

    #[test]
    fn speech_board_gets_control_code_from_lamp_write() {
        let (mut mpu, recorder) = self::mpu(Generation::Gen3, SoundBoardKind::Speech);
        mpu.write_port(3, 0x75);
        assert_eq!(*recorder.events.borrow(), vec![('c', 0x70)]);
    }

    #[test]
    fn sound_cpu_board_strobes_active_low() {
        let (mut mpu, recorder) = self::mpu(Generation::Gen4, SoundBoardKind::SoundCpu);
        mpu.write_port(2, 0x2A); // column latch doubles as sound data
        mpu.write_port(3, 0x40); // enable bit high: no dispatch
        assert!(recorder.events.borrow().is_empty());
        mpu.write_port(3, 0x00); // enable low: data + strobe
        assert_eq!(*recorder.events.borrow(), vec![('d', 0x2A), ('c', 0)]);
    }

    #[test]
    fn gen1_score_display_write() {
        let (mut mpu, _) = self::mpu(Generation::Gen1, SoundBoardKind::FourTones);
        mpu.write_port(2, 0x34); // latch two BCD digits
        mpu.write_port(3, 0x0D); // selector = 0x0D ^ 0x0F = 2
        assert_eq!(mpu.segments()[0], BCD2SEG7[3]);
        assert_eq!(mpu.segments()[1], BCD2SEG7[4]);
        assert_eq!(mpu.segments()[2] & 0x80, 0x80); // comma segments set
    }

    #[test]
    fn gen1_sound_and_player_up_write() {
        let (mut mpu, recorder) = self::mpu(Generation::Gen1, SoundBoardKind::FourTones);
        mpu.write_port(2, 0x34);
        mpu.write_port(3, 0x0E); // selector 1
        assert_eq!(*recorder.events.borrow(), vec![('d', 0x34)]);
        // Player-up light: (1 << (0x34 >> 5)) >> 1 = 1
        assert_eq!(mpu.lamps.pending_lamps()[6], 0x01);
    }

    #[test]
    fn gen1_solenoid_write_commits_with_q() {
        let (mut mpu, _) = self::mpu(Generation::Gen1, SoundBoardKind::FourTones);
        mpu.write_port(2, 0x42);
        mpu.write_port(3, 0x0F); // selector 0: solenoid byte
        assert_eq!(mpu.solenoids(), 0); // pending until the frame commit
        mpu.set_q(true);
        mpu.frame_tick();
        assert_eq!(mpu.solenoids(), 0x42 | Q_SOLENOID_BIT);
        mpu.set_q(false);
        mpu.frame_tick();
        assert_eq!(mpu.solenoids(), 0x42);
    }

    #[test]
    fn gen1_lamp_rows_keyed_by_ef1() {
        let (mut mpu, _) = self::mpu(Generation::Gen1, SoundBoardKind::FourTones);
        mpu.write_port(4, 0x11);
        mpu.write_port(5, 0x22);
        mpu.write_port(6, 0x33);
        for _ in 0..8 {
            mpu.periodic_tick(); // wrap tick toggles EF1 high
        }
        mpu.write_port(4, 0x44);
        let pending = mpu.lamps.pending_lamps();
        assert_eq!(pending[0], 0x11);
        assert_eq!(pending[1], 0x44);
        assert_eq!(pending[2], 0x22);
        assert_eq!(pending[4], 0x33);
    }

    #[test]
    fn gen1_reads_rows_with_top_rows_inverted() {
        let (mut mpu, switches) = mpu_with_switches(Generation::Gen1);
        switches.borrow_mut().rows = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        for port in 0..6 {
            assert_eq!(mpu.read_port(port), switches.borrow().rows[usize::from(port)]);
        }
        assert_eq!(mpu.read_port(6), !0x07);
        assert_eq!(mpu.read_port(7), !0x08);
    }

    #[test]
    fn switch_reads_follow_digit_selector() {
        for generation in [Generation::Gen2, Generation::Gen3, Generation::Gen4] {
            let (mut mpu, switches) = mpu_with_switches(generation);
            switches.borrow_mut().rows = [0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7];
            for sel in 0..6u8 {
                mpu.write_port(1, 1 << sel); // column select
                assert_eq!(mpu.read_port(4), 0xA2 + sel);
            }
            mpu.write_port(1, 1 << 6); // selector 6: out of range
            assert_eq!(mpu.read_port(4), 0);
        }
    }

    #[test]
    fn diagnostic_read_inversion_per_generation() {
        let (mut mpu, switches) = mpu_with_switches(Generation::Gen2);
        switches.borrow_mut().rows[1] = 0x35;
        assert_eq!(mpu.read_port(5), !0x35);

        for generation in [Generation::Gen3, Generation::Gen4] {
            let (mut mpu, switches) = mpu_with_switches(generation);
            switches.borrow_mut().rows[0] = 0x21;
            switches.borrow_mut().rows[1] = 0x35;
            mpu.write_port(1, 0x02); // digit selector 1
            assert_eq!(mpu.read_port(5), 0x21 ^ 0x0F);
            mpu.write_port(1, 0x04); // any other selector
            assert_eq!(mpu.read_port(5), 0x35 ^ 0x0F);
        }
    }

    #[test]
    fn unmapped_ports_are_harmless() {
        let (mut mpu, _) = self::mpu(Generation::Gen3, SoundBoardKind::Speech);
        mpu.write_port(0, 0xFF);
        assert_eq!(mpu.read_port(0), 0);
        assert_eq!(mpu.read_port(1), 0); // output channel on the read side
    }
}
