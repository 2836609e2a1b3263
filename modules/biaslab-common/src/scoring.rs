use serde::{Deserialize, Serialize};

use crate::types::ScoreSet;

// --- Dimensions ---

/// The five scored bias dimensions. Fixed and known; the engine may
/// omit some in a response but never adds new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    EmotionalTone,
    FramingChoices,
    FactualGrounding,
    IdeologicalStance,
    SourceTransparency,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::EmotionalTone,
        Dimension::FramingChoices,
        Dimension::FactualGrounding,
        Dimension::IdeologicalStance,
        Dimension::SourceTransparency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::EmotionalTone => "emotional_tone",
            Dimension::FramingChoices => "framing_choices",
            Dimension::FactualGrounding => "factual_grounding",
            Dimension::IdeologicalStance => "ideological_stance",
            Dimension::SourceTransparency => "source_transparency",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// --- Bands ---

/// Ordinal severity band over a 0-100 score. Contiguous: every score in
/// [0,100] maps to exactly one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Medium,
    High,
    ExtremelyHigh,
}

impl Band {
    /// Human-readable form ("extremely high" instead of the wire tag).
    pub fn label(self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Medium => "medium",
            Band::High => "high",
            Band::ExtremelyHigh => "extremely high",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Band::Low => write!(f, "low"),
            Band::Medium => write!(f, "medium"),
            Band::High => write!(f, "high"),
            Band::ExtremelyHigh => write!(f, "extremely_high"),
        }
    }
}

/// Band thresholds, shared by per-dimension scores and the overall
/// index. Both scales must read off the same constants.
pub const MEDIUM_FLOOR: f64 = 30.0;
pub const HIGH_FLOOR: f64 = 50.0;
pub const EXTREME_FLOOR: f64 = 70.0;

/// Map a 0-100 score to its band. Total: NaN falls back to `Low`.
pub fn classify(score: f64) -> Band {
    if score.is_nan() {
        return Band::Low;
    }
    if score < MEDIUM_FLOOR {
        Band::Low
    } else if score < HIGH_FLOOR {
        Band::Medium
    } else if score < EXTREME_FLOOR {
        Band::High
    } else {
        Band::ExtremelyHigh
    }
}

/// Classify an optional score; an unscored dimension reads as `Low`.
pub fn classify_opt(score: Option<f64>) -> Band {
    score.map(classify).unwrap_or(Band::Low)
}

// --- Overall index ---

/// The derived 0-100 bias index. The server's value is taken verbatim;
/// the client only classifies it when the server omitted the band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallIndex {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<Band>,
}

impl OverallIndex {
    /// Band shown to the user. A server-supplied band wins; otherwise
    /// the shared classifier derives one.
    pub fn display_band(&self) -> Band {
        self.band.unwrap_or_else(|| classify(self.value))
    }
}

// --- Aggregation ---

struct Weight {
    dimension: Dimension,
    fraction: f64,
    /// Inverted dimensions measure a quality whose *absence* is bias:
    /// strong factual grounding lowers the index.
    inverted: bool,
}

/// Fixed weighting of the five dimensions. Fractions sum to 1.0.
const WEIGHTS: [Weight; 5] = [
    Weight { dimension: Dimension::FramingChoices, fraction: 0.25, inverted: false },
    Weight { dimension: Dimension::FactualGrounding, fraction: 0.25, inverted: true },
    Weight { dimension: Dimension::SourceTransparency, fraction: 0.20, inverted: true },
    Weight { dimension: Dimension::EmotionalTone, fraction: 0.15, inverted: false },
    Weight { dimension: Dimension::IdeologicalStance, fraction: 0.15, inverted: false },
];

/// Fold per-dimension scores into the overall index. The engine
/// normally supplies the index itself; this exists for display-side
/// sanity checks and for callers that only have dimension scores.
///
/// A missing dimension contributes 0 to its weighted term. Its weight
/// is not redistributed to the remaining dimensions.
pub fn aggregate(scores: &ScoreSet) -> OverallIndex {
    let mut total = 0.0;
    for weight in &WEIGHTS {
        let Some(raw) = scores.get(weight.dimension) else {
            continue;
        };
        if !raw.is_finite() {
            continue;
        }
        let value = raw.clamp(0.0, 100.0);
        let value = if weight.inverted { 100.0 - value } else { value };
        total += weight.fraction * value;
    }
    let value = total.round().clamp(0.0, 100.0);
    OverallIndex {
        value,
        band: Some(classify(value)),
    }
}

/// User-facing verdict for an overall index. Built on `classify` so the
/// verdict boundaries can never drift from the band boundaries.
pub fn verdict(index: f64) -> &'static str {
    match classify(index) {
        Band::Low => "Not biased",
        Band::Medium => "Some bias",
        Band::High => "Biased",
        Band::ExtremelyHigh => "Highly biased",
    }
}
