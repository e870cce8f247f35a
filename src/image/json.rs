//! JSON summary of a compiled song

use super::writer::image_len;
use crate::compiler::Song;
use serde::Serialize;

/// Serializable view of a compiled song
#[derive(Debug, Clone, Serialize)]
pub struct SongSummary {
    /// Song name from the NAME directive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Raw entry point bytes
    pub entry: [u8; 4],
    /// Offset of each track in the instruction stream
    pub track_offsets: Vec<u16>,
    /// Instruction stream length
    pub data_len: usize,
    /// Total image length
    pub image_len: usize,
    /// Per-track byte ranges
    pub tracks: Vec<TrackJson>,
}

/// Byte range of one track
#[derive(Debug, Clone, Serialize)]
pub struct TrackJson {
    pub index: usize,
    pub offset: u16,
    pub len: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bytes: Vec<u8>,
}

impl SongSummary {
    /// Build a summary, optionally including the raw bytes of each track
    pub fn new(song: &Song, with_bytes: bool) -> Self {
        let tracks = (0..song.track_offsets.len())
            .filter_map(|index| {
                let range = song.track_range(index)?;
                Some(TrackJson {
                    index,
                    offset: song.track_offsets[index],
                    len: range.len(),
                    bytes: if with_bytes {
                        song.data[range].to_vec()
                    } else {
                        Vec::new()
                    },
                })
            })
            .collect();

        Self {
            name: song.name.clone(),
            entry: song.entry,
            track_offsets: song.track_offsets.clone(),
            data_len: song.data.len(),
            image_len: image_len(song.track_offsets.len(), song.data.len()),
            tracks,
        }
    }
}
