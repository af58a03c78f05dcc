use crate::config::QualityConfig;
use crate::presets::{preset_for, NetworkQuality};
use serde::Serialize;

/// min/ideal/max bounds for one capture dimension.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintRange {
    pub min: u32,
    pub ideal: u32,
    pub max: u32,
}

/// Capture constraints for acquiring the local video track.
///
/// Built from configuration before any peer connection exists and handed
/// to the embedding layer's media-acquisition call. The lower bounds come
/// from the poor-tier preset so a track acquired under these constraints
/// can always satisfy the lowest adaptation target.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct MediaTrackConstraints {
    pub width: ConstraintRange,
    pub height: ConstraintRange,
    pub frame_rate: ConstraintRange,
}

const MAX_CAPTURE_WIDTH: u32 = 1920;
const MAX_CAPTURE_HEIGHT: u32 = 1080;
const MAX_CAPTURE_FRAME_RATE: u32 = 60;

impl MediaTrackConstraints {
    /// Derive capture constraints from an optimizer configuration.
    pub fn from_config(config: &QualityConfig) -> Self {
        let floor = preset_for(NetworkQuality::Poor);
        let ideal = preset_for(NetworkQuality::Excellent);

        Self {
            width: ConstraintRange {
                min: floor.width,
                ideal: ideal.width,
                max: MAX_CAPTURE_WIDTH,
            },
            height: ConstraintRange {
                min: floor.height,
                ideal: ideal.height,
                max: MAX_CAPTURE_HEIGHT,
            },
            frame_rate: ConstraintRange {
                min: floor.frame_rate,
                ideal: config.target_frame_rate.min(MAX_CAPTURE_FRAME_RATE),
                max: MAX_CAPTURE_FRAME_RATE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraints_from_default_config() {
        let constraints = MediaTrackConstraints::from_config(&QualityConfig::default());
        assert_eq!(constraints.width.ideal, 1280);
        assert_eq!(constraints.height.ideal, 720);
        assert_eq!(constraints.frame_rate.ideal, 30);
        assert_eq!(constraints.width.min, 320);
        assert_eq!(constraints.width.max, 1920);
    }

    #[test]
    fn test_frame_rate_ideal_capped_at_capture_max() {
        let config = QualityConfig {
            target_frame_rate: 120,
            ..Default::default()
        };
        let constraints = MediaTrackConstraints::from_config(&config);
        assert_eq!(constraints.frame_rate.ideal, 60);
    }

    #[test]
    fn test_ranges_are_ordered() {
        let constraints = MediaTrackConstraints::from_config(&QualityConfig::default());
        for range in [
            constraints.width,
            constraints.height,
            constraints.frame_rate,
        ] {
            assert!(range.min <= range.ideal);
            assert!(range.ideal <= range.max);
        }
    }
}
