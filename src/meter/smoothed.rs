//! Gap-proportional follower with a temporally dithered bar width
//!
//! The level is scaled to a pixel width with an 8-bit fractional remainder.
//! An 8-bit phase counter advances once per tick; whenever the remainder is
//! above the phase the bar is drawn one pixel wider. Over a full phase sweep
//! the extra pixel is shown for exactly `remainder` of 256 ticks.

use super::MeterConfig;

/// Pixel width split into whole pixels and 1/256ths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BarWidth {
    pub pixels: u16,
    pub frac: u8,
}

/// Smoothed and dithered level follower
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothedMeter {
    env_q8: u16,
    phase: u8,
    config: MeterConfig,
}

impl SmoothedMeter {
    pub fn new() -> Self {
        Self::with_config(MeterConfig::default())
    }

    pub fn with_config(config: MeterConfig) -> Self {
        Self {
            env_q8: 0,
            phase: 0,
            config,
        }
    }

    pub fn reset(&mut self) {
        self.env_q8 = 0;
        self.phase = 0;
    }

    pub fn envelope(&self) -> u16 {
        self.env_q8
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Current level, capped at the configured maximum
    pub fn level(&self) -> u8 {
        (self.env_q8 >> 8).min(self.config.level_max as u16) as u8
    }

    /// Exact (undithered) bar width for the current level
    pub fn bar_width(&self) -> BarWidth {
        scale_level(self.level(), &self.config)
    }

    /// Advance one tick and return the displayed width in pixels
    pub fn step(&mut self, sample: u8) -> u16 {
        let target = (sample as u16) << 8;

        if target >= self.env_q8 {
            self.env_q8 = target;
        } else {
            let delta = self.env_q8 - target;
            let decay = (delta >> 3) + 1;
            self.env_q8 = self.env_q8.saturating_sub(decay);
        }

        let width = self.bar_width();
        let shown = if width.frac > self.phase {
            width.pixels + 1
        } else {
            width.pixels
        };
        self.phase = self.phase.wrapping_add(1);
        shown
    }
}

impl Default for SmoothedMeter {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale a level linearly onto `0..=width_max` pixels
pub fn scale_level(level: u8, config: &MeterConfig) -> BarWidth {
    if config.level_max == 0 {
        return BarWidth::default();
    }
    let level = level.min(config.level_max) as u32;
    let q8 = level * config.width_max as u32 * 256 / config.level_max as u32;
    BarWidth {
        pixels: (q8 >> 8) as u16,
        frac: (q8 & 0xFF) as u8,
    }
}
