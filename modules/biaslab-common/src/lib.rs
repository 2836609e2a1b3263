pub mod config;
pub mod highlights;
pub mod narratives;
pub mod scoring;
pub mod types;

pub use config::Config;
pub use scoring::{aggregate, classify, classify_opt, verdict, Band, Dimension, OverallIndex};
pub use types::{
    AnalysisReport, Article, ArticleId, Claim, Highlight, HighlightSpan, Narrative, NarrativeData,
    NarrativeId, ScoreSet, SourceRef,
};
