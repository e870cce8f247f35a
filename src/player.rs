//! Playback session over an external bytecode engine
//!
//! The session owns at most one compiled image. A successful load replaces
//! it; a failed load stops playback and keeps the previous image around for
//! the play toggle, but reports `Load error`.

use crate::compiler::{Assembler, Song};
use crate::error::Result;
use crate::meter::{MeterSnapshot, SharedMeter};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Engine that executes song images
pub trait Engine {
    /// Start playing an image from its entry point
    fn play(&mut self, image: &[u8]);
    /// Pause if playing, resume if paused
    fn pause_toggle(&mut self);
    /// Halt playback
    fn stop(&mut self);
    /// Set the output gain multiplier
    fn set_master_gain(&mut self, gain: f32);
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// One-line session status shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    ChooseFile,
    Playing,
    Paused,
    Stopped,
    LoadError,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::ChooseFile => "Choose file",
            Status::Playing => "Playing",
            Status::Paused => "Paused",
            Status::Stopped => "Stopped",
            Status::LoadError => "Load error",
        };
        f.write_str(s)
    }
}

/// File name without directories or a trailing `.atm` extension
pub fn display_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let len = name.len();
    if len > 4 && name.is_char_boundary(len - 4) && name[len - 4..].eq_ignore_ascii_case(".atm") {
        name[..len - 4].to_string()
    } else {
        name
    }
}

/// A playback session
pub struct Session<E: Engine> {
    engine: E,
    assembler: Assembler,
    song: Option<Song>,
    image: Option<Vec<u8>>,
    state: PlaybackState,
    status: Status,
    meters: SharedMeter,
}

impl<E: Engine> Session<E> {
    pub fn new(engine: E, channel_count: usize) -> Self {
        Self {
            engine,
            assembler: Assembler::new(),
            song: None,
            image: None,
            state: PlaybackState::Stopped,
            status: Status::ChooseFile,
            meters: SharedMeter::new(channel_count),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn song(&self) -> Option<&Song> {
        self.song.as_ref()
    }

    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    /// Handle for the UI to read meter snapshots from
    pub fn meters(&self) -> SharedMeter {
        self.meters.clone()
    }

    /// Compile song text and start playing it
    pub fn load_text(&mut self, text: &str) -> Result<()> {
        let loaded = self
            .assembler
            .compile(text)
            .and_then(|song| song.to_image().map(|image| (song, image)));
        self.finish_load(loaded)
    }

    /// Load a song file and start playing it
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let loaded = self
            .assembler
            .compile_file(path)
            .and_then(|song| song.to_image().map(|image| (song, image)));
        self.finish_load(loaded)
    }

    fn finish_load(&mut self, loaded: Result<(Song, Vec<u8>)>) -> Result<()> {
        match loaded {
            Ok((song, image)) => {
                debug!(bytes = image.len(), "loaded song image");
                self.song = Some(song);
                let image = self.image.insert(image);
                self.meters.reset();
                self.engine.play(image);
                self.state = PlaybackState::Playing;
                self.status = Status::Playing;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "song failed to load");
                self.halt();
                self.status = Status::LoadError;
                Err(e)
            }
        }
    }

    /// Play when stopped, otherwise pause or resume
    ///
    /// Returns false when no image is loaded.
    pub fn toggle(&mut self) -> bool {
        let Some(image) = self.image.as_deref() else {
            return false;
        };

        self.state = match self.state {
            PlaybackState::Stopped => {
                self.engine.play(image);
                PlaybackState::Playing
            }
            PlaybackState::Playing => {
                self.engine.pause_toggle();
                PlaybackState::Paused
            }
            PlaybackState::Paused => {
                self.engine.pause_toggle();
                PlaybackState::Playing
            }
        };
        self.status = self.state_status();
        true
    }

    /// Stop playback and clear the meters
    pub fn stop(&mut self) {
        self.halt();
        self.status = self.state_status();
    }

    fn halt(&mut self) {
        self.engine.stop();
        self.meters.reset();
        self.state = PlaybackState::Stopped;
    }

    fn state_status(&self) -> Status {
        match self.state {
            PlaybackState::Stopped => Status::Stopped,
            PlaybackState::Playing => Status::Playing,
            PlaybackState::Paused => Status::Paused,
        }
    }

    pub fn set_master_gain(&mut self, gain: f32) {
        self.engine.set_master_gain(gain);
    }

    /// Feed one tick of per-channel samples from the engine to the meters
    pub fn tick(&self, samples: &[u8]) {
        if self.state == PlaybackState::Playing {
            self.meters.tick(samples);
        }
    }

    pub fn meter_snapshot(&self) -> MeterSnapshot {
        self.meters.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::path::PathBuf;

    #[derive(Debug, Default)]
    struct RecordingEngine {
        played: Vec<Vec<u8>>,
        pause_toggles: usize,
        stops: usize,
        gain: f32,
    }

    impl Engine for RecordingEngine {
        fn play(&mut self, image: &[u8]) {
            self.played.push(image.to_vec());
        }
        fn pause_toggle(&mut self) {
            self.pause_toggles += 1;
        }
        fn stop(&mut self) {
            self.stops += 1;
        }
        fn set_master_gain(&mut self, gain: f32) {
            self.gain = gain;
        }
    }

    const SONG: &str = "ATM1 ENTRY 0,0,0,0 TRACK STOP ENDTRACK END";

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(&PathBuf::from("/ext/apps_data/atm/title.atm")), "title");
        assert_eq!(display_name(&PathBuf::from("Song.ATM")), "Song");
        assert_eq!(display_name(&PathBuf::from("notes.txt")), "notes.txt");
        assert_eq!(display_name(&PathBuf::from(".atm")), ".atm");
    }

    #[test]
    fn test_load_plays() {
        let mut session = Session::new(RecordingEngine::default(), 4);
        assert_eq!(session.status(), Status::ChooseFile);
        session.load_text(SONG).unwrap();
        assert_eq!(session.state(), PlaybackState::Playing);
        assert_eq!(session.status().to_string(), "Playing");
        assert_eq!(session.engine().played.len(), 1);
        assert_eq!(session.image().unwrap(), &session.engine().played[0][..]);
    }

    #[test]
    fn test_failed_load_keeps_previous_image() {
        let mut session = Session::new(RecordingEngine::default(), 4);
        session.load_text(SONG).unwrap();
        let before = session.image().unwrap().to_vec();

        let err = session.load_text("ATM1 ENTRY 0,0,0,0 TRACK NOTE 64 ENDTRACK END");
        assert!(matches!(err, Err(Error::Range(_))));
        assert_eq!(session.status(), Status::LoadError);
        assert_eq!(session.state(), PlaybackState::Stopped);
        assert_eq!(session.engine().stops, 1);
        assert_eq!(session.image().unwrap(), &before[..]);
    }

    #[test]
    fn test_toggle_cycle() {
        let mut session = Session::new(RecordingEngine::default(), 4);
        assert!(!session.toggle());

        session.load_text(SONG).unwrap();
        assert!(session.toggle());
        assert_eq!(session.status(), Status::Paused);
        assert!(session.toggle());
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(session.engine().pause_toggles, 2);

        session.stop();
        assert_eq!(session.status(), Status::Stopped);
        assert!(session.toggle());
        assert_eq!(session.state(), PlaybackState::Playing);
        assert_eq!(session.engine().played.len(), 2);
    }

    #[test]
    fn test_stop_resets_meters() {
        let mut session = Session::new(RecordingEngine::default(), 2);
        session.load_text(SONG).unwrap();
        session.tick(&[63, 30]);
        assert_eq!(session.meter_snapshot().levels, vec![63, 30]);

        session.stop();
        assert_eq!(session.meter_snapshot().levels, vec![0, 0]);

        // ticks while stopped do not move the meters
        session.tick(&[63, 63]);
        assert_eq!(session.meter_snapshot().levels, vec![0, 0]);
    }

    #[test]
    fn test_master_gain() {
        let mut session = Session::new(RecordingEngine::default(), 1);
        session.set_master_gain(0.5);
        assert_eq!(session.engine().gain, 0.5);
    }
}
