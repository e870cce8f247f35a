//! Song assembler - turns ATM song text into an engine-ready image
//!
//! The text grammar is a strict sequence of directives:
//!
//! ```text
//! ATM1
//! [NAME free text to end of line]
//! ENTRY a, b, c, d
//! TRACK <instructions...> ENDTRACK   (1 to 255 times)
//! END
//! ```

pub mod encoder;
pub mod literal;
pub mod tokenizer;

use crate::error::{Error, Result};
use crate::image::buffer::{ByteBuffer, OffsetBuffer};
use crate::image::writer::{self, ENTRY_SIZE, MAX_TRACKS};
use encoder::emit_instruction;
use literal::parse_int;
use std::fs::File;
use std::io::Read;
use std::ops::Range;
use std::path::Path;
use tokenizer::{token_equals, Tokenizer};
use tracing::{debug, info};

/// Directive keywords
pub mod directive {
    pub const MAGIC: &str = "ATM1";
    pub const NAME: &str = "NAME";
    pub const ENTRY: &str = "ENTRY";
    pub const TRACK: &str = "TRACK";
    pub const ENDTRACK: &str = "ENDTRACK";
    pub const END: &str = "END";
}

/// Largest accepted song text in bytes
pub const MAX_TEXT_SIZE: usize = 32 * 1024;

/// Characters kept from the song name
pub const SONG_NAME_MAX: usize = 47;

/// A compiled song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    /// Name from the optional NAME directive
    pub name: Option<String>,
    /// Entry point bytes, passed through to the engine
    pub entry: [u8; ENTRY_SIZE],
    /// Offset of each track's first instruction in `data`
    pub track_offsets: Vec<u16>,
    /// Instruction stream shared by all tracks
    pub data: Vec<u8>,
}

impl Song {
    pub fn track_count(&self) -> usize {
        self.track_offsets.len()
    }

    /// Byte range of a track, running to the next track's offset
    pub fn track_range(&self, index: usize) -> Option<Range<usize>> {
        let start = *self.track_offsets.get(index)? as usize;
        let end = self
            .track_offsets
            .get(index + 1)
            .map_or(self.data.len(), |&next| next as usize);
        Some(start..end)
    }

    /// Length of the image produced by [`Song::to_image`]
    pub fn image_len(&self) -> usize {
        writer::image_len(self.track_offsets.len(), self.data.len())
    }

    /// Lay out the binary image handed to the playback engine
    pub fn to_image(&self) -> Result<Vec<u8>> {
        writer::write_image(&self.track_offsets, &self.entry, &self.data)
    }
}

/// Song text assembler
#[derive(Debug, Clone)]
pub struct Assembler {
    /// Largest text accepted by [`Assembler::compile_reader`] and [`Assembler::compile_file`]
    pub max_text_size: usize,
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            max_text_size: MAX_TEXT_SIZE,
        }
    }

    /// Compile song text straight to an image
    pub fn assemble(&self, text: &str) -> Result<Vec<u8>> {
        self.compile(text)?.to_image()
    }

    /// Compile song text
    pub fn compile(&self, text: &str) -> Result<Song> {
        let mut tz = Tokenizer::new(text);

        expect(&mut tz, directive::MAGIC)?;
        let name = parse_name(&mut tz)?;
        let entry = parse_entry(&mut tz)?;

        let mut data = ByteBuffer::new();
        let mut offsets = OffsetBuffer::new();

        loop {
            let token = tz
                .next_directive()
                .ok_or_else(|| Error::Syntax("missing END".into()))?;

            if token_equals(&token, directive::END) {
                break;
            }
            if !token_equals(&token, directive::TRACK) {
                return Err(Error::Syntax(format!("expected TRACK or END, found '{}'", token)));
            }

            let offset = u16::try_from(data.len()).map_err(|_| {
                Error::Range(format!("track offset {} exceeds 16 bits", data.len()))
            })?;
            offsets.push(offset)?;
            debug!(track = offsets.len() - 1, offset, "track");

            parse_track(&mut tz, &mut data)?;
        }

        if offsets.is_empty() || offsets.len() > MAX_TRACKS {
            return Err(Error::Range(format!(
                "track count {} outside 1..={}",
                offsets.len(),
                MAX_TRACKS
            )));
        }

        let song = Song {
            name,
            entry,
            track_offsets: offsets.into_vec(),
            data: data.into_vec(),
        };
        info!(
            tracks = song.track_count(),
            data_len = song.data.len(),
            image_len = song.image_len(),
            "compiled song"
        );
        Ok(song)
    }

    /// Read song text from a reader and compile it
    pub fn compile_reader<R: Read>(&self, input: R) -> Result<Song> {
        let mut bytes = Vec::new();
        let limit = self.max_text_size as u64 + 1;
        input.take(limit).read_to_end(&mut bytes)?;

        self.check_size(bytes.len() as u64)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        self.compile(&text)
    }

    /// Compile a song file
    pub fn compile_file(&self, path: &Path) -> Result<Song> {
        let file = File::open(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to open '{}': {}", path.display(), e),
            ))
        })?;
        self.check_size(file.metadata()?.len())?;
        debug!(path = %path.display(), "compiling file");
        self.compile_reader(file)
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size == 0 {
            return Err(Error::EmptyInput);
        }
        if size > self.max_text_size as u64 {
            return Err(Error::InputTooLarge {
                size,
                max: self.max_text_size,
            });
        }
        Ok(())
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Require the next token to be `keyword`
fn expect(tz: &mut Tokenizer<'_>, keyword: &str) -> Result<()> {
    match tz.next_directive() {
        Some(token) if token_equals(&token, keyword) => Ok(()),
        Some(token) => Err(Error::Syntax(format!("expected {}, found '{}'", keyword, token))),
        None => Err(Error::Syntax(format!("expected {}, found end of input", keyword))),
    }
}

/// Parse the optional NAME line and the ENTRY keyword that follows it
fn parse_name(tz: &mut Tokenizer<'_>) -> Result<Option<String>> {
    let token = tz
        .next_directive()
        .ok_or_else(|| Error::Syntax("expected NAME or ENTRY, found end of input".into()))?;

    if token_equals(&token, directive::ENTRY) {
        return Ok(None);
    }
    if !token_equals(&token, directive::NAME) {
        return Err(Error::Syntax(format!("expected NAME or ENTRY, found '{}'", token)));
    }

    let name: String = tz
        .take_line_until(directive::ENTRY, ENTRY_SIZE)
        .chars()
        .take(SONG_NAME_MAX)
        .collect();
    debug!(name = %name, "song name");
    expect(tz, directive::ENTRY)?;
    Ok(Some(name))
}

/// Parse the four entry point bytes
fn parse_entry(tz: &mut Tokenizer<'_>) -> Result<[u8; ENTRY_SIZE]> {
    let mut entry = [0u8; ENTRY_SIZE];
    for byte in entry.iter_mut() {
        let token = tz
            .next_arg()
            .ok_or_else(|| Error::Syntax("ENTRY needs 4 values".into()))?;
        let value = parse_int(&token).ok_or(Error::Literal(token))?;
        *byte = (value & 0xFF) as u8;
    }
    Ok(entry)
}

/// Encode instructions up to and including ENDTRACK
fn parse_track(tz: &mut Tokenizer<'_>, data: &mut ByteBuffer) -> Result<()> {
    while let Some(token) = tz.next_directive() {
        if token_equals(&token, directive::ENDTRACK) {
            return Ok(());
        }
        emit_instruction(tz, &token, data)?;
    }
    Err(Error::Syntax("TRACK without ENDTRACK".into()))
}
