//! Instruction encoder
//!
//! Maps one mnemonic and its argument tokens to bytecode. Any token that is
//! not a mnemonic but parses as an integer literal is emitted as a raw byte.

use super::literal::parse_int;
use super::tokenizer::{token_equals, Tokenizer};
use crate::error::{Error, Result};
use crate::image::buffer::ByteBuffer;
use crate::image::opcode::{op, LONG_DELAY_BIAS, NOTE_MAX, SHORT_DELAY_MAX};
use crate::image::vle::encode_vle;
use tracing::trace;

/// Instruction mnemonics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Db,
    Note,
    Delay,
    Stop,
    Return,
    Goto,
    Repeat,
    SetTempo,
    AddTempo,
    SetVolume,
    VolumeSlideOn,
    VolumeSlideOff,
    SetNoteCut,
    NoteCutOff,
    SetTransposition,
    TranspositionOff,
    GotoAdvanced,
    SetVibrato,
}

impl Mnemonic {
    pub const ALL: [Mnemonic; 18] = [
        Mnemonic::Db,
        Mnemonic::Note,
        Mnemonic::Delay,
        Mnemonic::Stop,
        Mnemonic::Return,
        Mnemonic::Goto,
        Mnemonic::Repeat,
        Mnemonic::SetTempo,
        Mnemonic::AddTempo,
        Mnemonic::SetVolume,
        Mnemonic::VolumeSlideOn,
        Mnemonic::VolumeSlideOff,
        Mnemonic::SetNoteCut,
        Mnemonic::NoteCutOff,
        Mnemonic::SetTransposition,
        Mnemonic::TranspositionOff,
        Mnemonic::GotoAdvanced,
        Mnemonic::SetVibrato,
    ];

    /// Keyword as written in song text
    pub fn keyword(self) -> &'static str {
        match self {
            Mnemonic::Db => "DB",
            Mnemonic::Note => "NOTE",
            Mnemonic::Delay => "DELAY",
            Mnemonic::Stop => "STOP",
            Mnemonic::Return => "RETURN",
            Mnemonic::Goto => "GOTO",
            Mnemonic::Repeat => "REPEAT",
            Mnemonic::SetTempo => "SET_TEMPO",
            Mnemonic::AddTempo => "ADD_TEMPO",
            Mnemonic::SetVolume => "SET_VOLUME",
            Mnemonic::VolumeSlideOn => "VOLUME_SLIDE_ON",
            Mnemonic::VolumeSlideOff => "VOLUME_SLIDE_OFF",
            Mnemonic::SetNoteCut => "SET_NOTE_CUT",
            Mnemonic::NoteCutOff => "NOTE_CUT_OFF",
            Mnemonic::SetTransposition => "SET_TRANSPOSITION",
            Mnemonic::TranspositionOff => "TRANSPOSITION_OFF",
            Mnemonic::GotoAdvanced => "GOTO_ADVANCED",
            Mnemonic::SetVibrato => "SET_VIBRATO",
        }
    }

    /// Number of argument tokens consumed
    pub fn arg_count(self) -> usize {
        match self {
            Mnemonic::Stop
            | Mnemonic::Return
            | Mnemonic::VolumeSlideOff
            | Mnemonic::NoteCutOff
            | Mnemonic::TranspositionOff => 0,
            Mnemonic::Repeat | Mnemonic::SetVibrato => 2,
            Mnemonic::GotoAdvanced => 4,
            _ => 1,
        }
    }

    /// Fixed opcode for instructions of the form `opcode, operands...`
    ///
    /// `DB`, `NOTE` and `DELAY` have no fixed opcode.
    pub fn opcode(self) -> Option<u8> {
        match self {
            Mnemonic::Db | Mnemonic::Note | Mnemonic::Delay => None,
            Mnemonic::Stop => Some(op::STOP),
            Mnemonic::Return => Some(op::RETURN),
            Mnemonic::Goto => Some(op::GOTO),
            Mnemonic::Repeat => Some(op::REPEAT),
            Mnemonic::SetTempo => Some(op::SET_TEMPO),
            Mnemonic::AddTempo => Some(op::ADD_TEMPO),
            Mnemonic::SetVolume => Some(op::SET_VOLUME),
            Mnemonic::VolumeSlideOn => Some(op::VOLUME_SLIDE_ON),
            Mnemonic::VolumeSlideOff => Some(op::VOLUME_SLIDE_OFF),
            Mnemonic::SetNoteCut => Some(op::SET_NOTE_CUT),
            Mnemonic::NoteCutOff => Some(op::NOTE_CUT_OFF),
            Mnemonic::SetTransposition => Some(op::SET_TRANSPOSITION),
            Mnemonic::TranspositionOff => Some(op::TRANSPOSITION_OFF),
            Mnemonic::GotoAdvanced => Some(op::GOTO_ADVANCED),
            Mnemonic::SetVibrato => Some(op::SET_VIBRATO),
        }
    }

    /// Look up a mnemonic, ignoring case
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| token_equals(token, m.keyword()))
    }
}

/// Read and parse one integer argument
fn read_arg(tz: &mut Tokenizer<'_>, mnemonic: Mnemonic) -> Result<i32> {
    let token = tz.next_arg().ok_or_else(|| {
        Error::Syntax(format!("{} is missing an argument", mnemonic.keyword()))
    })?;
    parse_int(&token).ok_or(Error::Literal(token))
}

/// Encode a delay of `ticks` ticks
pub fn encode_delay(ticks: i32, data: &mut ByteBuffer) -> Result<()> {
    if ticks < 1 {
        return Err(Error::Range(format!("DELAY {} is below 1", ticks)));
    }

    if ticks <= SHORT_DELAY_MAX {
        data.push_wrapped(op::DELAY_BASE as i32 + ticks)
    } else {
        data.push(op::DELAY_LONG)?;
        data.extend(&encode_vle((ticks - LONG_DELAY_BIAS) as u32))
    }
}

/// Encode the instruction named by `op_token`, reading its arguments from `tz`
pub fn emit_instruction(tz: &mut Tokenizer<'_>, op_token: &str, data: &mut ByteBuffer) -> Result<()> {
    let Some(mnemonic) = Mnemonic::from_token(op_token) else {
        let value = parse_int(op_token).ok_or_else(|| Error::Literal(op_token.to_string()))?;
        trace!(value, "raw byte");
        return data.push_wrapped(value);
    };

    let mut args = [0i32; 4];
    for arg in args.iter_mut().take(mnemonic.arg_count()) {
        *arg = read_arg(tz, mnemonic)?;
    }
    trace!(op = mnemonic.keyword(), args = ?&args[..mnemonic.arg_count()], "instruction");

    match mnemonic {
        Mnemonic::Db => data.push_wrapped(args[0]),
        Mnemonic::Note => {
            if !(0..=NOTE_MAX).contains(&args[0]) {
                return Err(Error::Range(format!("NOTE {} outside 0..={}", args[0], NOTE_MAX)));
            }
            data.push_wrapped(args[0])
        }
        Mnemonic::Delay => encode_delay(args[0], data),
        _ => {
            let opcode = mnemonic.opcode().ok_or_else(|| {
                Error::Syntax(format!("{} has no fixed opcode", mnemonic.keyword()))
            })?;
            data.push(opcode)?;
            for &arg in &args[..mnemonic.arg_count()] {
                data.push_wrapped(arg)?;
            }
            Ok(())
        }
    }
}
