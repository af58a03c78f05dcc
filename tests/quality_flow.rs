// End-to-end flow through the public API: a call session degrades, the
// optimizer steps the encoding down, the network recovers, and the
// session is disposed cleanly.

use std::sync::Arc;
use std::time::Duration;

use vqo::rtc::mock::{MockStatsSource, MockVideoSender};
use vqo::{
    AdaptationMode, CandidatePairReport, InitOutcome, MediaTrackConstraints, NetworkQuality,
    OutboundVideoReport, QualityConfig, StatsSource, TransportSample, VideoQualityOptimizer,
    VideoSender,
};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sample(bytes_sent: u64, bandwidth_kbps: f64, rtt_ms: f64, lost: u64) -> TransportSample {
    TransportSample {
        outbound_video: Some(OutboundVideoReport {
            bytes_sent,
            packets_sent: 2000,
            packets_lost: lost,
            frames_per_second: 30.0,
            frame_width: 1280,
            frame_height: 720,
            jitter_ms: 5.0,
        }),
        candidate_pair: Some(CandidatePairReport {
            round_trip_ms: Some(rtt_ms),
            available_outgoing_kbps: Some(bandwidth_kbps),
        }),
    }
}

#[tokio::test(start_paused = true)]
async fn degrade_and_recover_session() {
    init_tracing();

    let config = QualityConfig::default();
    let constraints = MediaTrackConstraints::from_config(&config);
    assert_eq!(constraints.width.ideal, 1280);

    let optimizer = VideoQualityOptimizer::new(config).unwrap();
    let source = Arc::new(MockStatsSource::new());
    let sender = Arc::new(MockVideoSender::new());

    // Healthy network for the first cycles.
    source.push_sample(sample(0, 2500.0, 20.0, 0));
    // Then a congested stretch: low bandwidth, high RTT, loss.
    source.push_sample(sample(500_000, 400.0, 250.0, 80));

    let outcome = optimizer.initialize(
        Arc::clone(&source) as Arc<dyn StatsSource>,
        Some(Arc::clone(&sender) as Arc<dyn VideoSender>),
    );
    assert_eq!(outcome, InitOutcome::Initialized);
    assert!(optimizer.is_active());

    tokio::time::sleep(Duration::from_secs(12)).await;

    // The degraded cycles must have stepped the encoding down to the
    // poor-tier preset.
    let applied = sender.applied_parameters();
    assert!(applied
        .iter()
        .any(|params| params.max_bitrate_kbps == 400 && params.max_frame_rate == 15));

    let stats = optimizer.get_stats();
    assert!(stats.adaptations >= 1);
    assert_eq!(stats.width, 1280);
    assert!(stats.quality_score <= 100);

    // Live reading reflects the still-degraded scripted conditions.
    let condition = optimizer.get_network_conditions().await;
    assert_eq!(condition.quality, NetworkQuality::Poor);

    // Clean disposal, twice.
    optimizer.shutdown().await;
    optimizer.shutdown().await;
    assert!(!optimizer.is_active());
}

#[tokio::test(start_paused = true)]
async fn manual_session_is_operator_driven() {
    init_tracing();

    let optimizer = VideoQualityOptimizer::new(QualityConfig {
        adaptation_mode: AdaptationMode::Manual,
        ..Default::default()
    })
    .unwrap();
    let source = Arc::new(MockStatsSource::new());
    let sender = Arc::new(MockVideoSender::new());
    source.push_sample(sample(0, 300.0, 300.0, 100));

    optimizer.initialize(
        Arc::clone(&source) as Arc<dyn StatsSource>,
        Some(Arc::clone(&sender) as Arc<dyn VideoSender>),
    );

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(sender.applied_parameters().is_empty());

    optimizer
        .set_quality_preset(NetworkQuality::Fair)
        .await
        .unwrap();
    let applied = sender.applied_parameters();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].max_bitrate_kbps, 800);

    optimizer.shutdown().await;
}
