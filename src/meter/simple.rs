//! Instant-attack, proportional-decay level follower

use super::LEVEL_MAX;

/// Envelope follower with an 8.8 fixed-point accumulator
///
/// A sample at or above the current envelope replaces it. Otherwise the
/// envelope loses 1/16 of itself (plus one) per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleMeter {
    env_q8: u16,
}

impl SimpleMeter {
    pub fn new() -> Self {
        Self { env_q8: 0 }
    }

    pub fn reset(&mut self) {
        self.env_q8 = 0;
    }

    /// Raw accumulator value
    pub fn envelope(&self) -> u16 {
        self.env_q8
    }

    /// Current level without advancing
    pub fn level(&self) -> u8 {
        ((self.env_q8 >> 8) as u8).min(LEVEL_MAX)
    }

    /// Advance one tick with the channel's sample magnitude, returning the 6-bit level
    pub fn step(&mut self, sample: u8) -> u8 {
        let target = (sample as u16) << 8;

        if target >= self.env_q8 {
            self.env_q8 = target;
        } else {
            let decay = (self.env_q8 >> 4) + 1;
            self.env_q8 = self.env_q8.saturating_sub(decay);
        }

        self.level()
    }
}
