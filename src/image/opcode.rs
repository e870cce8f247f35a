//! Opcode values understood by the playback engine

/// Instruction opcodes
pub mod op {
    /// Base for short delays: `DELAY_BASE + n` waits n ticks (n = 1..=64)
    pub const DELAY_BASE: u8 = 159;
    /// Long delay, followed by a VLE operand biased by [`LONG_DELAY_BIAS`](super::LONG_DELAY_BIAS)
    pub const DELAY_LONG: u8 = 224;
    pub const STOP: u8 = 0x9F;
    pub const RETURN: u8 = 0xFE;
    pub const GOTO: u8 = 0xFC;
    pub const REPEAT: u8 = 0xFD;
    pub const SET_TEMPO: u8 = 0x9D;
    pub const ADD_TEMPO: u8 = 0x9C;
    pub const SET_VOLUME: u8 = 0x40;
    pub const VOLUME_SLIDE_ON: u8 = 0x41;
    pub const VOLUME_SLIDE_OFF: u8 = 0x43;
    pub const SET_NOTE_CUT: u8 = 0x54;
    pub const NOTE_CUT_OFF: u8 = 0x55;
    pub const SET_TRANSPOSITION: u8 = 0x4C;
    pub const TRANSPOSITION_OFF: u8 = 0x4D;
    pub const GOTO_ADVANCED: u8 = 0x9E;
    pub const SET_VIBRATO: u8 = 0x4E;
}

/// Highest note number
pub const NOTE_MAX: i32 = 63;

/// Longest delay expressible with a single byte
pub const SHORT_DELAY_MAX: i32 = 64;

/// Subtracted from long delays before VLE encoding
pub const LONG_DELAY_BIAS: i32 = 65;
