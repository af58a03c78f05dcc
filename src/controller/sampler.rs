use super::types::VideoStats;
use crate::classifier::{
    NetworkCondition, DEFAULT_BANDWIDTH_KBPS, DEFAULT_LATENCY_MS, DEFAULT_PACKET_LOSS_PCT,
};
use crate::rtc::TransportSample;
use std::time::Instant;
use tracing::trace;

/// Turns cumulative engine counters into per-cycle statistics.
///
/// Holds only the previous cycle's byte counter and timestamp; all
/// derived values land in `VideoStats`.
#[derive(Debug, Default)]
pub struct StatsSampler {
    last_bytes_sent: Option<u64>,
    last_sample_at: Option<Instant>,
}

impl StatsSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one transport sample into the stats snapshot.
    ///
    /// Missing reports leave the corresponding fields at their
    /// last-known values. The very first sample only seeds the bitrate
    /// delta baseline.
    pub fn ingest(&mut self, sample: &TransportSample, stats: &mut VideoStats, now: Instant) {
        if let Some(outbound) = &sample.outbound_video {
            if let (Some(last_bytes), Some(last_at)) = (self.last_bytes_sent, self.last_sample_at) {
                let seconds = now.duration_since(last_at).as_secs_f64();
                if seconds > 0.0 {
                    let bytes_delta = outbound.bytes_sent.saturating_sub(last_bytes);
                    stats.bitrate_kbps = bytes_delta as f64 * 8.0 / seconds / 1000.0;
                }
            }
            self.last_bytes_sent = Some(outbound.bytes_sent);
            self.last_sample_at = Some(now);

            stats.frame_rate = outbound.frames_per_second;
            stats.width = outbound.frame_width;
            stats.height = outbound.frame_height;
            stats.packets_sent = outbound.packets_sent;
            stats.packets_lost = outbound.packets_lost;
            stats.jitter_ms = outbound.jitter_ms;
        }

        if let Some(pair) = &sample.candidate_pair {
            if let Some(rtt) = pair.round_trip_ms {
                stats.round_trip_ms = rtt;
            }
        }

        trace!(
            "Sampled stats: {:.0} kbps, {:.1} fps, {}x{}",
            stats.bitrate_kbps,
            stats.frame_rate,
            stats.width,
            stats.height
        );
    }

    /// Forget the delta baseline, so the next sample seeds it afresh.
    pub fn reset(&mut self) {
        self.last_bytes_sent = None;
        self.last_sample_at = None;
    }
}

/// Derive the cycle's network condition from a transport sample,
/// falling back to the default measurements for anything missing.
pub fn condition_from_sample(sample: &TransportSample) -> NetworkCondition {
    let bandwidth_kbps = sample
        .candidate_pair
        .and_then(|pair| pair.available_outgoing_kbps)
        .unwrap_or(DEFAULT_BANDWIDTH_KBPS);

    let latency_ms = sample
        .candidate_pair
        .and_then(|pair| pair.round_trip_ms)
        .unwrap_or(DEFAULT_LATENCY_MS);

    let packet_loss_pct = sample
        .outbound_video
        .map(|outbound| {
            if outbound.packets_sent > 0 {
                outbound.packets_lost as f64 / outbound.packets_sent as f64 * 100.0
            } else {
                DEFAULT_PACKET_LOSS_PCT
            }
        })
        .unwrap_or(DEFAULT_PACKET_LOSS_PCT);

    NetworkCondition::from_measurements(bandwidth_kbps, latency_ms, packet_loss_pct)
}
