use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Live statistics for the outbound video stream.
///
/// Owned by the controller; subscribers and `get_stats` callers receive
/// clones.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct VideoStats {
    /// Measured send bitrate (kbps), delta-derived per cycle
    pub bitrate_kbps: f64,
    /// Encoder output frame rate
    pub frame_rate: f64,
    /// Current encoded frame width
    pub width: u32,
    /// Current encoded frame height
    pub height: u32,
    /// Cumulative packets sent
    pub packets_sent: u64,
    /// Cumulative packets lost
    pub packets_lost: u64,
    /// RTP jitter (ms)
    pub jitter_ms: f64,
    /// Round-trip time of the active transport path (ms)
    pub round_trip_ms: f64,
    /// Composite 0-100 quality score (informational)
    pub quality_score: u8,
    /// Number of adaptations applied this session
    pub adaptations: u64,
}

impl Default for VideoStats {
    fn default() -> Self {
        Self {
            bitrate_kbps: 0.0,
            frame_rate: 0.0,
            width: 0,
            height: 0,
            packets_sent: 0,
            packets_lost: 0,
            jitter_ms: 0.0,
            round_trip_ms: 0.0,
            quality_score: 100,
            adaptations: 0,
        }
    }
}

/// Outcome of `initialize`.
///
/// `NoVideoTrack` leaves the optimizer constructed but inert: the
/// monitoring task never starts and no engine reference is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Initialized,
    NoVideoTrack,
}

/// Append-only record of adaptation timestamps.
///
/// Only the trailing rate-limit window is ever inspected, so entries
/// older than the window are pruned on every touch.
#[derive(Debug, Default)]
pub struct AdaptationHistory {
    entries: VecDeque<Instant>,
}

impl AdaptationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an adaptation at `now`.
    pub fn record(&mut self, now: Instant, window: Duration) {
        self.prune(now, window);
        self.entries.push_back(now);
    }

    /// Number of adaptations within the trailing window ending at `now`.
    pub fn count_within(&mut self, now: Instant, window: Duration) -> usize {
        self.prune(now, window);
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(front) = self.entries.front() {
            if now.duration_since(*front) > window {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }
}
