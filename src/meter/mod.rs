//! Channel level meters
//!
//! Each channel carries two followers fed with the same per-tick sample: a
//! [`SimpleMeter`] giving a 6-bit level and a [`SmoothedMeter`] giving a
//! dithered bar width in pixels.

pub mod shared;
pub mod simple;
pub mod smoothed;

pub use shared::{MeterSnapshot, SharedMeter};
pub use simple::SimpleMeter;
pub use smoothed::{BarWidth, SmoothedMeter};

use serde::{Deserialize, Serialize};

/// Highest level reported by a meter
pub const LEVEL_MAX: u8 = 63;

/// Width in pixels of a full-scale bar
pub const WIDTH_MAX: u16 = 120;

/// Display scaling for the smoothed follower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterConfig {
    pub level_max: u8,
    pub width_max: u16,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            level_max: LEVEL_MAX,
            width_max: WIDTH_MAX,
        }
    }
}

/// Both followers for one channel, plus their latest outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMeter {
    pub simple: SimpleMeter,
    pub smoothed: SmoothedMeter,
    level: u8,
    width: u16,
}

impl ChannelMeter {
    pub fn new(config: MeterConfig) -> Self {
        Self {
            simple: SimpleMeter::new(),
            smoothed: SmoothedMeter::with_config(config),
            level: 0,
            width: 0,
        }
    }

    pub fn step(&mut self, sample: u8) {
        self.level = self.simple.step(sample);
        self.width = self.smoothed.step(sample);
    }

    pub fn reset(&mut self) {
        self.simple.reset();
        self.smoothed.reset();
        self.level = 0;
        self.width = 0;
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn width(&self) -> u16 {
        self.width
    }
}

/// Meters for every channel of a playback session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterBank {
    channels: Vec<ChannelMeter>,
}

impl MeterBank {
    pub fn new(channel_count: usize) -> Self {
        Self::with_config(channel_count, MeterConfig::default())
    }

    pub fn with_config(channel_count: usize, config: MeterConfig) -> Self {
        Self {
            channels: vec![ChannelMeter::new(config); channel_count],
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channel(&self, index: usize) -> Option<&ChannelMeter> {
        self.channels.get(index)
    }

    /// Advance every channel by one tick
    ///
    /// Channels without a sample in `samples` are fed silence; extra samples
    /// are ignored.
    pub fn tick(&mut self, samples: &[u8]) {
        for (i, channel) in self.channels.iter_mut().enumerate() {
            channel.step(samples.get(i).copied().unwrap_or(0));
        }
    }

    /// Zero all accumulators and dither phases
    pub fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }
    }

    pub fn levels(&self) -> Vec<u8> {
        self.channels.iter().map(ChannelMeter::level).collect()
    }

    pub fn widths(&self) -> Vec<u16> {
        self.channels.iter().map(ChannelMeter::width).collect()
    }
}
