//! Song image layout
//!
//! ```text
//! [track_count: u8]
//! [track_offsets: u16 LE * track_count]
//! [entry: 4 bytes]
//! [instruction stream]
//! ```

use crate::error::{Error, Result};

/// Size of the entry point block
pub const ENTRY_SIZE: usize = 4;

/// Maximum number of tracks in one song
pub const MAX_TRACKS: usize = 255;

/// Total image size for a given track count and stream length
pub fn image_len(track_count: usize, data_len: usize) -> usize {
    1 + track_count * 2 + ENTRY_SIZE + data_len
}

/// Lay out the final song image
pub fn write_image(track_offsets: &[u16], entry: &[u8; ENTRY_SIZE], data: &[u8]) -> Result<Vec<u8>> {
    if track_offsets.is_empty() || track_offsets.len() > MAX_TRACKS {
        return Err(Error::Range(format!(
            "track count {} outside 1..={}",
            track_offsets.len(),
            MAX_TRACKS
        )));
    }

    let size = image_len(track_offsets.len(), data.len());
    let mut song = Vec::new();
    song.try_reserve_exact(size).map_err(|_| Error::OutOfMemory)?;

    song.push(track_offsets.len() as u8);
    for &offset in track_offsets {
        song.extend_from_slice(&offset.to_le_bytes());
    }
    song.extend_from_slice(entry);
    song.extend_from_slice(data);

    debug_assert_eq!(song.len(), size);
    Ok(song)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_track() {
        let image = write_image(&[0], &[0, 0, 0, 0], &[0x9F]).unwrap();
        assert_eq!(image, vec![0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x9F]);
    }

    #[test]
    fn test_offsets_little_endian() {
        let image = write_image(&[0, 0x0102], &[1, 2, 3, 4], &[]).unwrap();
        assert_eq!(image, vec![0x02, 0x00, 0x00, 0x02, 0x01, 1, 2, 3, 4]);
        assert_eq!(image.len(), image_len(2, 0));
    }

    #[test]
    fn test_track_count_limits() {
        assert!(matches!(write_image(&[], &[0; 4], &[]), Err(Error::Range(_))));
        let offsets = vec![0u16; MAX_TRACKS + 1];
        assert!(matches!(write_image(&offsets, &[0; 4], &[]), Err(Error::Range(_))));
        let offsets = vec![0u16; MAX_TRACKS];
        assert_eq!(write_image(&offsets, &[0; 4], &[]).unwrap().len(), image_len(MAX_TRACKS, 0));
    }
}
