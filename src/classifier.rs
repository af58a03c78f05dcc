use crate::presets::NetworkQuality;
use serde::Serialize;

/// One cycle's view of the transport path. Recomputed every sampling
/// cycle and never persisted.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct NetworkCondition {
    pub bandwidth_kbps: f64,
    pub latency_ms: f64,
    pub packet_loss_pct: f64,
    pub quality: NetworkQuality,
}

impl NetworkCondition {
    /// Build a condition from raw measurements, classifying as we go.
    pub fn from_measurements(bandwidth_kbps: f64, latency_ms: f64, packet_loss_pct: f64) -> Self {
        Self {
            bandwidth_kbps,
            latency_ms,
            packet_loss_pct,
            quality: classify(bandwidth_kbps, latency_ms, packet_loss_pct),
        }
    }
}

/// Fallback measurements used when the engine reports nothing.
pub const DEFAULT_BANDWIDTH_KBPS: f64 = 1000.0;
pub const DEFAULT_LATENCY_MS: f64 = 100.0;
pub const DEFAULT_PACKET_LOSS_PCT: f64 = 0.0;

impl Default for NetworkCondition {
    /// Fallback values used when statistics are unavailable.
    fn default() -> Self {
        Self::from_measurements(
            DEFAULT_BANDWIDTH_KBPS,
            DEFAULT_LATENCY_MS,
            DEFAULT_PACKET_LOSS_PCT,
        )
    }
}

/// Map raw measurements to a discrete quality tier.
///
/// Rules are evaluated in strict precedence order, first match wins,
/// so a single bad dimension pulls the whole classification down.
pub fn classify(bandwidth_kbps: f64, latency_ms: f64, packet_loss_pct: f64) -> NetworkQuality {
    if bandwidth_kbps < 500.0 || latency_ms > 200.0 || packet_loss_pct > 3.0 {
        NetworkQuality::Poor
    } else if bandwidth_kbps < 1000.0 || latency_ms > 100.0 || packet_loss_pct > 1.0 {
        NetworkQuality::Fair
    } else if bandwidth_kbps < 2000.0 || latency_ms > 50.0 || packet_loss_pct > 0.5 {
        NetworkQuality::Good
    } else {
        NetworkQuality::Excellent
    }
}
