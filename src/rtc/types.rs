use serde::Serialize;

/// Raw counters from the outbound-video RTP report.
///
/// Counters are cumulative over the life of the stream; the sampler
/// turns them into rates by diffing against the previous cycle.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct OutboundVideoReport {
    pub bytes_sent: u64,
    pub packets_sent: u64,
    pub packets_lost: u64,
    pub frames_per_second: f64,
    pub frame_width: u32,
    pub frame_height: u32,
    pub jitter_ms: f64,
}

/// Counters from the active candidate-pair (transport path) report.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct CandidatePairReport {
    /// Current round-trip time of the selected path, if the engine
    /// reports one.
    pub round_trip_ms: Option<f64>,
    /// Engine bandwidth estimate for the outgoing direction, if any.
    pub available_outgoing_kbps: Option<f64>,
}

/// One poll of the engine's statistics API. Either report may be
/// missing; the sampler degrades gracefully when it is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransportSample {
    pub outbound_video: Option<OutboundVideoReport>,
    pub candidate_pair: Option<CandidatePairReport>,
}

/// Encoding parameters applied to the outbound sender.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct EncodingParameters {
    pub max_bitrate_kbps: u32,
    pub min_bitrate_kbps: u32,
    pub max_frame_rate: u32,
}

/// Ideal geometry constraints applied directly to the local track when
/// resolution scaling is enabled.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct TrackConstraints {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub ideal_frame_rate: u32,
}
