//! Meter bank shared between the tick source and the UI

use super::{MeterBank, MeterConfig};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

/// Copy of all channel outputs taken under the lock
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeterSnapshot {
    pub levels: Vec<u8>,
    pub widths: Vec<u16>,
}

/// Cloneable handle to a locked [`MeterBank`]
///
/// The tick source calls [`SharedMeter::tick`]; readers take a
/// [`SharedMeter::snapshot`] and draw from the copy.
#[derive(Debug, Clone)]
pub struct SharedMeter {
    bank: Arc<Mutex<MeterBank>>,
}

impl SharedMeter {
    pub fn new(channel_count: usize) -> Self {
        Self::with_config(channel_count, MeterConfig::default())
    }

    pub fn with_config(channel_count: usize, config: MeterConfig) -> Self {
        Self {
            bank: Arc::new(Mutex::new(MeterBank::with_config(channel_count, config))),
        }
    }

    pub fn tick(&self, samples: &[u8]) {
        self.bank.lock().tick(samples);
    }

    pub fn reset(&self) {
        self.bank.lock().reset();
    }

    pub fn snapshot(&self) -> MeterSnapshot {
        let bank = self.bank.lock();
        MeterSnapshot {
            levels: bank.levels(),
            widths: bank.widths(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_snapshot_from_other_thread() {
        let meter = SharedMeter::new(2);
        let ticker = meter.clone();

        thread::spawn(move || {
            for _ in 0..10 {
                ticker.tick(&[63, 20]);
            }
        })
        .join()
        .unwrap();

        let snap = meter.snapshot();
        assert_eq!(snap.levels, vec![63, 20]);
        assert_eq!(snap.widths[0], 120);
    }

    #[test]
    fn test_reset_clears_snapshot() {
        let meter = SharedMeter::new(3);
        meter.tick(&[10, 20, 30]);
        meter.reset();
        assert_eq!(meter.snapshot(), MeterSnapshot {
            levels: vec![0; 3],
            widths: vec![0; 3],
        });
    }
}
