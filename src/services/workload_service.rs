//! Acute:Chronic Workload Ratio over a bounded, session-indexed history.
//!
//! - Acute load: today's distance plus the most recent `acute_window` prior sessions
//! - Chronic load: today's distance plus the whole history, divided by `chronic_divisor`
//!   once the history holds more than `sparse_history` sessions, otherwise by 1
//! - ACWR: acute / chronic, with a zero chronic load forced to 1

use crate::models::{WorkloadSnapshot, WorkoutRecord};

pub const DEFAULT_ACUTE_WINDOW: usize = 6;
pub const DEFAULT_CHRONIC_DIVISOR: f64 = 4.0;
pub const DEFAULT_SPARSE_HISTORY: usize = 4;

/// ACWR calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcwrCalculator {
    /// Prior sessions counted into the acute load (default: 6)
    acute_window: usize,
    /// Divisor approximating ~4 weekly windows (default: 4)
    chronic_divisor: f64,
    /// History length at or below which the divisor collapses to 1 (default: 4)
    sparse_history: usize,
}

impl AcwrCalculator {
    pub fn new() -> Self {
        Self {
            acute_window: DEFAULT_ACUTE_WINDOW,
            chronic_divisor: DEFAULT_CHRONIC_DIVISOR,
            sparse_history: DEFAULT_SPARSE_HISTORY,
        }
    }

    pub fn with_windows(acute_window: usize, chronic_divisor: f64, sparse_history: usize) -> Self {
        Self {
            acute_window,
            chronic_divisor,
            sparse_history,
        }
    }

    /// Divisor applied to the chronic sum for a history of `history_len` sessions
    pub fn divisor_for(&self, history_len: usize) -> f64 {
        if history_len > self.sparse_history {
            self.chronic_divisor
        } else {
            1.0
        }
    }

    /// Compute the workload for today's distance against `history` (most recent first)
    pub fn compute(&self, current_km: f64, history: &[WorkoutRecord]) -> WorkloadSnapshot {
        let acute_load = current_km
            + history
                .iter()
                .take(self.acute_window)
                .map(|w| w.distance_km)
                .sum::<f64>();

        let total: f64 = history.iter().map(|w| w.distance_km).sum::<f64>() + current_km;
        let divisor = self.divisor_for(history.len());

        let mut chronic_load = total / divisor;
        if chronic_load == 0.0 {
            chronic_load = 1.0;
        }

        WorkloadSnapshot {
            acute_load,
            chronic_load,
            divisor,
            ratio: acute_load / chronic_load,
        }
    }
}

impl Default for AcwrCalculator {
    fn default() -> Self {
        Self::new()
    }
}
