//! Adaptive video quality optimization for RTC call sessions.
//!
//! A `VideoQualityOptimizer` is created per call session and attached to
//! the call's peer connection through two trait seams: a [`rtc::StatsSource`]
//! for transport statistics and a [`rtc::VideoSender`] for encoding control.
//! Every sampling cycle it classifies the network into one of four quality
//! tiers and, in automatic mode, nudges the outbound encoding toward the
//! matching preset. Adaptation is rate limited and hysteresis guarded so
//! the stream does not thrash on noise, and every failure path is
//! non-fatal: the call itself is never blocked by the optimizer.

pub mod classifier;
pub mod config;
pub mod constraints;
pub mod controller;
pub mod error;
pub mod presets;
pub mod rtc;
pub mod score;

pub use classifier::{classify, NetworkCondition};
pub use config::{AdaptationMode, QualityConfig, VideoCodec};
pub use constraints::{ConstraintRange, MediaTrackConstraints};
pub use controller::{InitOutcome, VideoQualityOptimizer, VideoStats};
pub use error::{Result, VqoError};
pub use presets::{preset_for, NetworkQuality, QualityPreset};
pub use rtc::{
    CandidatePairReport, EncodingParameters, MediaCapabilities, OutboundVideoReport, StatsSource,
    TrackConstraints, TransportSample, VideoSender,
};
pub use score::{quality_score, ScoreInputs};
