use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{Dimension, OverallIndex};

// --- Identifiers ---

/// Server-assigned article identifier. Opaque to the client; the store
/// owns its format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NarrativeId(pub String);

impl std::fmt::Display for NarrativeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Scores ---

/// Per-dimension bias scores as returned by the analysis engine.
/// Dimensions the engine did not score are `None`; rendering shows them
/// as 0 but aggregation keeps the distinction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_tone: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framing_choices: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factual_grounding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideological_stance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_transparency: Option<f64>,
}

impl ScoreSet {
    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::EmotionalTone => self.emotional_tone,
            Dimension::FramingChoices => self.framing_choices,
            Dimension::FactualGrounding => self.factual_grounding,
            Dimension::IdeologicalStance => self.ideological_stance,
            Dimension::SourceTransparency => self.source_transparency,
        }
    }

    /// Score shown for a dimension; an unscored dimension renders as 0.
    pub fn display_value(&self, dimension: Dimension) -> f64 {
        self.get(dimension).unwrap_or(0.0)
    }

    /// All dimensions in their fixed, documented order.
    pub fn entries(&self) -> impl Iterator<Item = (Dimension, Option<f64>)> + '_ {
        Dimension::ALL.iter().map(|&d| (d, self.get(d)))
    }
}

// --- Articles ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    #[serde(default)]
    pub outlet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub scores: ScoreSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// --- Claims ---

/// How many supporting sources are surfaced per claim.
pub const MAX_CLAIM_SOURCES: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub url: String,
}

impl SourceRef {
    /// Link text: the title when present, else the raw URL.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.url)
    }
}

/// Extracted factual assertion. Produced once per analysis, immutable
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

impl Claim {
    pub fn confidence_pct(&self) -> u32 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    pub fn display_sources(&self) -> &[SourceRef] {
        &self.sources[..self.sources.len().min(MAX_CLAIM_SOURCES)]
    }
}

// --- Highlights ---

/// Exact-phrase span in the analyzed text. Belongs to one article by
/// foreign reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub article_id: ArticleId,
    /// Dimension tag as sent by the engine. Left as a plain tag so an
    /// unrecognized value cannot fail the whole fetch.
    pub dimension: String,
    #[serde(default)]
    pub data: HighlightSpan,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighlightSpan {
    #[serde(default)]
    pub text: String,
    /// Character offsets into the analyzed text. Absent for text-mode
    /// submissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

// --- Narratives ---

/// Cross-article cluster. Membership is an explicit id list rather than
/// embedded articles, so Article and Narrative never own each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Narrative {
    pub id: NarrativeId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: NarrativeData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeData {
    /// Member articles in discovery order.
    #[serde(default)]
    pub article_ids: Vec<ArticleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

// --- Analysis results ---

/// Result of a completed analysis run, as returned by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: ArticleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub scores: ScoreSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<OverallIndex>,
    #[serde(default)]
    pub claims: Vec<Claim>,
}
