//! Seams between the optimizer and the RTC engine hosting the call.
//!
//! The optimizer never talks to a concrete peer connection. The embedding
//! call layer implements these traits over whatever engine it uses and
//! hands them in at initialization; tests use the mocks in [`mock`].

mod types;

pub mod mock;

pub use types::{
    CandidatePairReport, EncodingParameters, OutboundVideoReport, TrackConstraints,
    TransportSample,
};

use crate::error::Result;
use async_trait::async_trait;

/// Read side of the engine: the peer connection's statistics API.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Poll the current outbound-video and candidate-pair reports.
    ///
    /// Returning a sample with both reports absent is valid; an `Err`
    /// means the statistics call itself failed.
    async fn poll_stats(&self) -> Result<TransportSample>;
}

/// Write side of the engine: the outbound video sender.
#[async_trait]
pub trait VideoSender: Send + Sync {
    /// Apply new encoding parameters to the sender.
    async fn apply_parameters(&self, params: EncodingParameters) -> Result<()>;

    /// Apply geometry constraints to the underlying local track.
    async fn apply_constraints(&self, constraints: TrackConstraints) -> Result<()>;
}

/// Capability probe for the media engine.
///
/// The optimizer itself only needs `supports_capture` as a pre-flight
/// check before the embedder attempts track acquisition.
pub trait MediaCapabilities {
    /// Whether the engine can acquire a local camera track at all.
    fn supports_capture(&self) -> bool;
}
