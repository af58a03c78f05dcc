use serde::{Deserialize, Serialize};

/// Discrete network quality tier.
///
/// Ordered worst to best so tiers can be compared directly.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NetworkQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl NetworkQuality {
    /// All tiers, worst to best.
    pub const ALL: [NetworkQuality; 4] = [
        NetworkQuality::Poor,
        NetworkQuality::Fair,
        NetworkQuality::Good,
        NetworkQuality::Excellent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkQuality::Poor => "poor",
            NetworkQuality::Fair => "fair",
            NetworkQuality::Good => "good",
            NetworkQuality::Excellent => "excellent",
        }
    }
}

impl std::fmt::Display for NetworkQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding target for one quality tier.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct QualityPreset {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
    pub bitrate_kbps: u32,
}

/// Static preset table, indexed by tier in `NetworkQuality::ALL` order.
///
/// Invariant: every dimension is monotonically non-decreasing from poor
/// to excellent.
const PRESETS: [QualityPreset; 4] = [
    // poor
    QualityPreset {
        width: 320,
        height: 240,
        frame_rate: 15,
        bitrate_kbps: 400,
    },
    // fair
    QualityPreset {
        width: 640,
        height: 360,
        frame_rate: 24,
        bitrate_kbps: 800,
    },
    // good
    QualityPreset {
        width: 960,
        height: 540,
        frame_rate: 30,
        bitrate_kbps: 1500,
    },
    // excellent
    QualityPreset {
        width: 1280,
        height: 720,
        frame_rate: 30,
        bitrate_kbps: 2500,
    },
];

/// Look up the encoding preset for a quality tier.
pub fn preset_for(quality: NetworkQuality) -> QualityPreset {
    PRESETS[quality as usize]
}
