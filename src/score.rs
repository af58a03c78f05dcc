/// Inputs for one quality-score computation.
///
/// All values come straight from the latest sampled stats; the score is
/// telemetry for the UI and never feeds back into adaptation decisions.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs {
    pub packets_sent: u64,
    pub packets_lost: u64,
    pub frame_rate: f64,
    pub target_frame_rate: f64,
    pub bitrate_kbps: f64,
    pub bitrate_midpoint_kbps: f64,
    pub round_trip_ms: f64,
    pub jitter_ms: f64,
}

/// Composite 0-100 quality score.
///
/// Starts at 100 and is reduced by packet loss, then scaled down by
/// frame-rate shortfall, bitrate shortfall relative to the midpoint of
/// the configured range, and jitter when the path RTT exceeds 100 ms.
pub fn quality_score(inputs: &ScoreInputs) -> u8 {
    let mut score = 100.0;

    if inputs.packets_sent > 0 {
        let loss_ratio = inputs.packets_lost as f64 / inputs.packets_sent as f64;
        score -= loss_ratio * 50.0;
    }

    if inputs.target_frame_rate > 0.0 {
        score *= (inputs.frame_rate / inputs.target_frame_rate).min(1.0);
    }

    if inputs.bitrate_midpoint_kbps > 0.0 {
        score *= (inputs.bitrate_kbps / inputs.bitrate_midpoint_kbps).min(1.0);
    }

    if inputs.round_trip_ms > 100.0 {
        score *= (1.0 - (inputs.jitter_ms - 100.0) / 500.0).max(0.5);
    }

    score.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_inputs() -> ScoreInputs {
        ScoreInputs {
            packets_sent: 1000,
            packets_lost: 0,
            frame_rate: 30.0,
            target_frame_rate: 30.0,
            bitrate_kbps: 2000.0,
            bitrate_midpoint_kbps: 1400.0,
            round_trip_ms: 20.0,
            jitter_ms: 2.0,
        }
    }

    #[test]
    fn test_healthy_path_scores_100() {
        assert_eq!(quality_score(&healthy_inputs()), 100);
    }

    #[test]
    fn test_total_loss_floors_at_zero() {
        let inputs = ScoreInputs {
            packets_lost: 1000,
            frame_rate: 0.0,
            bitrate_kbps: 0.0,
            ..healthy_inputs()
        };
        assert_eq!(quality_score(&inputs), 0);
    }

    #[test]
    fn test_score_never_exceeds_100() {
        // Over-delivering on fps and bitrate must not push past 100.
        let inputs = ScoreInputs {
            frame_rate: 60.0,
            bitrate_kbps: 10_000.0,
            ..healthy_inputs()
        };
        assert_eq!(quality_score(&inputs), 100);
    }

    #[test]
    fn test_frame_rate_shortfall_scales_score() {
        let inputs = ScoreInputs {
            frame_rate: 15.0,
            ..healthy_inputs()
        };
        assert_eq!(quality_score(&inputs), 50);
    }

    #[test]
    fn test_jitter_penalty_only_above_rtt_threshold() {
        let calm = ScoreInputs {
            jitter_ms: 400.0,
            round_trip_ms: 50.0,
            ..healthy_inputs()
        };
        assert_eq!(quality_score(&calm), 100);

        let congested = ScoreInputs {
            jitter_ms: 350.0,
            round_trip_ms: 150.0,
            ..healthy_inputs()
        };
        // 1 - (350 - 100) / 500 = 0.5
        assert_eq!(quality_score(&congested), 50);
    }

    #[test]
    fn test_jitter_penalty_floor() {
        let inputs = ScoreInputs {
            jitter_ms: 2000.0,
            round_trip_ms: 300.0,
            ..healthy_inputs()
        };
        // Penalty multiplier floors at 0.5 no matter how bad jitter gets.
        assert_eq!(quality_score(&inputs), 50);
    }

    #[test]
    fn test_zero_packets_sent_skips_loss_penalty() {
        let inputs = ScoreInputs {
            packets_sent: 0,
            packets_lost: 0,
            ..healthy_inputs()
        };
        assert_eq!(quality_score(&inputs), 100);
    }
}
