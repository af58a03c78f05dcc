//! Per-session video quality controller.
//!
//! One `VideoQualityOptimizer` instance is created per call session,
//! initialized with the engine seams, and disposed when the call ends.
//! All adaptation policy (classification, rate limiting, hysteresis)
//! lives here; raw measurement handling lives in [`sampler`].

mod sampler;
mod types;

pub use types::{InitOutcome, VideoStats};

use crate::classifier::NetworkCondition;
use crate::config::{AdaptationMode, QualityConfig};
use crate::error::{Result, VqoError};
use crate::presets::{preset_for, NetworkQuality, QualityPreset};
use crate::rtc::{EncodingParameters, StatsSource, TrackConstraints, VideoSender};
use crate::score::{quality_score, ScoreInputs};
use parking_lot::{Mutex, RwLock};
use sampler::{condition_from_sample, StatsSampler};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use types::AdaptationHistory;
use uuid::Uuid;

/// Rate limiting: at most this many adaptations per trailing window.
const MAX_ADAPTATIONS_PER_WINDOW: usize = 4;
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(10);

/// Hysteresis: adapt only when the target differs from observed state
/// by more than these deltas.
const WIDTH_DELTA_PX: i64 = 100;
const FRAME_RATE_DELTA_FPS: f64 = 5.0;
const BITRATE_DELTA_KBPS: f64 = 200.0;

type StatsCallback = Arc<dyn Fn(VideoStats) + Send + Sync>;

/// Adaptive quality controller for one outbound video stream.
pub struct VideoQualityOptimizer {
    inner: Arc<Inner>,
    task: Mutex<Option<JoinHandle<()>>>,
}

struct Inner {
    session_id: Uuid,
    config: RwLock<QualityConfig>,
    stats: Mutex<VideoStats>,
    sampler: Mutex<StatsSampler>,
    history: Mutex<AdaptationHistory>,
    stats_source: RwLock<Option<Arc<dyn StatsSource>>>,
    sender: RwLock<Option<Arc<dyn VideoSender>>>,
    on_stats: Mutex<Option<StatsCallback>>,
    cancel: CancellationToken,
}

impl VideoQualityOptimizer {
    /// Create a controller with the given configuration.
    pub fn new(config: QualityConfig) -> Result<Self> {
        config.validate()?;

        let session_id = Uuid::new_v4();
        debug!("Created quality optimizer for session {}", session_id);

        Ok(Self {
            inner: Arc::new(Inner {
                session_id,
                config: RwLock::new(config),
                stats: Mutex::new(VideoStats::default()),
                sampler: Mutex::new(StatsSampler::new()),
                history: Mutex::new(AdaptationHistory::new()),
                stats_source: RwLock::new(None),
                sender: RwLock::new(None),
                on_stats: Mutex::new(None),
                cancel: CancellationToken::new(),
            }),
            task: Mutex::new(None),
        })
    }

    /// Attach the engine seams and start the monitoring task.
    ///
    /// With no outbound video sender the optimizer stays inert:
    /// `get_network_conditions` still works through the stats source,
    /// but no monitoring task starts and nothing is ever applied.
    pub fn initialize(
        &self,
        stats_source: Arc<dyn StatsSource>,
        sender: Option<Arc<dyn VideoSender>>,
    ) -> InitOutcome {
        *self.inner.stats_source.write() = Some(stats_source);

        let sender = match sender {
            Some(sender) => sender,
            None => {
                warn!(
                    "No video sender for session {}, quality monitoring disabled",
                    self.inner.session_id
                );
                return InitOutcome::NoVideoTrack;
            }
        };
        *self.inner.sender.write() = Some(sender);

        let mut task = self.task.lock();
        if task.is_some() {
            warn!(
                "Optimizer for session {} already initialized",
                self.inner.session_id
            );
            return InitOutcome::Initialized;
        }
        *task = Some(tokio::spawn(Inner::run(Arc::clone(&self.inner))));

        InitOutcome::Initialized
    }

    /// Current statistics snapshot.
    pub fn get_stats(&self) -> VideoStats {
        self.inner.stats.lock().clone()
    }

    /// Register the stats subscriber. At most one is supported; a new
    /// registration replaces the previous one.
    pub fn on_stats<F>(&self, callback: F)
    where
        F: Fn(VideoStats) + Send + Sync + 'static,
    {
        *self.inner.on_stats.lock() = Some(Arc::new(callback));
    }

    /// Poll the engine for a fresh network condition reading.
    ///
    /// Falls back to the default condition when the engine is absent or
    /// the read fails.
    pub async fn get_network_conditions(&self) -> NetworkCondition {
        let source = self.inner.stats_source.read().clone();
        match source {
            Some(source) => match source.poll_stats().await {
                Ok(sample) => condition_from_sample(&sample),
                Err(e) => {
                    debug!("Network detection failed, using defaults: {}", e);
                    NetworkCondition::default()
                }
            },
            None => NetworkCondition::default(),
        }
    }

    /// Apply a quality preset immediately, bypassing classification,
    /// rate limiting, and hysteresis.
    pub async fn set_quality_preset(&self, tier: NetworkQuality) -> Result<()> {
        let config = self.inner.config.read().clone();
        let preset = preset_for(tier);

        self.inner.apply_preset(&config, preset).await?;
        self.inner.record_adaptation(Instant::now(), tier, preset);

        Ok(())
    }

    /// Replace the configuration wholesale.
    pub fn update_config(&self, config: QualityConfig) -> Result<()> {
        config.validate()?;
        info!(
            "Updating quality config for session {}",
            self.inner.session_id
        );
        *self.inner.config.write() = config;
        Ok(())
    }

    /// Whether the monitoring task is running.
    pub fn is_active(&self) -> bool {
        self.task.lock().is_some() && !self.inner.cancel.is_cancelled()
    }

    /// Stop monitoring and release engine references. Idempotent; any
    /// in-flight cycle observes the cancellation before touching the
    /// engine again.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                debug!("Monitoring task join error: {}", e);
            }
        }

        self.inner.history.lock().clear();
        self.inner.sampler.lock().reset();
        *self.inner.sender.write() = None;
        *self.inner.stats_source.write() = None;

        info!("Optimizer for session {} shut down", self.inner.session_id);
    }
}

impl Drop for VideoQualityOptimizer {
    fn drop(&mut self) {
        self.inner.cancel.cancel();
    }
}

impl Inner {
    async fn run(inner: Arc<Inner>) {
        info!(
            "Quality monitoring started for session {}",
            inner.session_id
        );

        loop {
            let period = Duration::from_secs(inner.config.read().sample_interval_secs);
            tokio::select! {
                _ = inner.cancel.cancelled() => break,
                _ = tokio::time::sleep(period) => inner.run_cycle().await,
            }
        }

        debug!(
            "Quality monitoring stopped for session {}",
            inner.session_id
        );
    }

    /// One sampling/adaptation cycle.
    async fn run_cycle(&self) {
        let source = match self.stats_source.read().clone() {
            Some(source) => source,
            None => return,
        };

        let sample = match source.poll_stats().await {
            Ok(sample) => sample,
            Err(e) => {
                debug!("Statistics read failed, skipping cycle: {}", e);
                return;
            }
        };

        // The read may have resolved after disposal; stop before
        // touching any more state.
        if self.cancel.is_cancelled() {
            return;
        }

        let now = Instant::now();
        let config = self.config.read().clone();
        let condition = condition_from_sample(&sample);

        let snapshot = {
            let mut stats = self.stats.lock();
            self.sampler.lock().ingest(&sample, &mut stats, now);
            stats.quality_score = quality_score(&ScoreInputs {
                packets_sent: stats.packets_sent,
                packets_lost: stats.packets_lost,
                frame_rate: stats.frame_rate,
                target_frame_rate: config.target_frame_rate as f64,
                bitrate_kbps: stats.bitrate_kbps,
                bitrate_midpoint_kbps: config.bitrate_midpoint_kbps(),
                round_trip_ms: stats.round_trip_ms,
                jitter_ms: stats.jitter_ms,
            });
            stats.clone()
        };
        self.publish(snapshot);

        let adaptation_enabled =
            config.enable_adaptive_bitrate || config.enable_resolution_scaling;
        if config.adaptation_mode == AdaptationMode::Automatic && adaptation_enabled {
            self.maybe_adapt(&config, condition, now).await;
        }
    }

    async fn maybe_adapt(&self, config: &QualityConfig, condition: NetworkCondition, now: Instant) {
        let recent = self
            .history
            .lock()
            .count_within(now, RATE_LIMIT_WINDOW);
        if recent >= MAX_ADAPTATIONS_PER_WINDOW {
            debug!(
                "Adaptation rate limit reached ({} in {:?}), skipping cycle",
                recent, RATE_LIMIT_WINDOW
            );
            return;
        }

        let target = preset_for(condition.quality);
        if !self.needs_adaptation(&target) {
            return;
        }

        match self.apply_preset(config, target).await {
            Ok(()) => self.record_adaptation(now, condition.quality, target),
            Err(e) => warn!(
                "Adaptation to {} tier failed, keeping current settings: {}",
                condition.quality, e
            ),
        }
    }

    /// Hysteresis check: skip targets that differ only marginally from
    /// the observed stream state.
    fn needs_adaptation(&self, target: &QualityPreset) -> bool {
        let stats = self.stats.lock();
        let width_delta = (stats.width as i64 - target.width as i64).abs();
        let frame_rate_delta = (stats.frame_rate - target.frame_rate as f64).abs();
        let bitrate_delta = (stats.bitrate_kbps - target.bitrate_kbps as f64).abs();

        width_delta > WIDTH_DELTA_PX
            || frame_rate_delta > FRAME_RATE_DELTA_FPS
            || bitrate_delta > BITRATE_DELTA_KBPS
    }

    async fn apply_preset(&self, config: &QualityConfig, target: QualityPreset) -> Result<()> {
        let sender = self
            .sender
            .read()
            .clone()
            .ok_or_else(|| VqoError::not_initialized("no video sender attached"))?;

        if self.cancel.is_cancelled() {
            return Err(VqoError::not_initialized("optimizer disposed"));
        }

        let max_bitrate_kbps = target
            .bitrate_kbps
            .clamp(config.min_bitrate_kbps, config.max_bitrate_kbps);
        sender
            .apply_parameters(EncodingParameters {
                max_bitrate_kbps,
                min_bitrate_kbps: config.min_bitrate_kbps.min(max_bitrate_kbps),
                max_frame_rate: target.frame_rate,
            })
            .await?;

        if config.enable_resolution_scaling {
            sender
                .apply_constraints(TrackConstraints {
                    ideal_width: target.width,
                    ideal_height: target.height,
                    ideal_frame_rate: target.frame_rate,
                })
                .await?;
        }

        Ok(())
    }

    fn record_adaptation(&self, now: Instant, tier: NetworkQuality, target: QualityPreset) {
        self.stats.lock().adaptations += 1;
        self.history.lock().record(now, RATE_LIMIT_WINDOW);
        info!(
            "Session {} adapted to {} tier ({}x{} @ {} fps, {} kbps)",
            self.session_id,
            tier,
            target.width,
            target.height,
            target.frame_rate,
            target.bitrate_kbps
        );
    }

    fn publish(&self, snapshot: VideoStats) {
        // Clone the handle out of the lock so a subscriber that
        // re-registers from inside its own invocation cannot deadlock.
        let callback = self.on_stats.lock().clone();
        if let Some(callback) = callback {
            callback(snapshot);
        }
    }
}
