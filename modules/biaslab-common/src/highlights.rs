use tracing::debug;

use crate::types::Highlight;

/// Instruction-echo fragments that occasionally leak out of the
/// extraction model. Matched case-insensitively as substrings; extend
/// the list here, callers are unaffected.
const LEAK_SIGNATURES: &[&str] = &["return only json"];

/// Longest span still believable as a single exact-phrase highlight.
const MAX_SPAN_CHARS: u32 = 2000;

/// Filter extraction artifacts out of a highlight batch before display.
/// Drops rows whose text is empty or a single character after trimming,
/// and rows carrying a known leak signature. Everything else passes
/// through untouched.
pub fn sanitize(highlights: Vec<Highlight>) -> Vec<Highlight> {
    highlights
        .into_iter()
        .filter(|h| {
            let text = h.data.text.trim();
            if text.chars().count() <= 1 {
                return false;
            }
            let lowered = text.to_lowercase();
            if LEAK_SIGNATURES.iter().any(|sig| lowered.contains(sig)) {
                debug!(article_id = %h.article_id, "Dropping leaked-instruction highlight");
                return false;
            }
            true
        })
        .collect()
}

/// Character range worth showing for a highlight, or `None` when the
/// offsets are missing or implausible (text-mode submissions carry no
/// offsets; a zero start or an enormous span means the extractor
/// guessed). The text and reasoning are shown either way.
pub fn display_range(highlight: &Highlight) -> Option<(u32, u32)> {
    let (Some(start), Some(end)) = (highlight.data.start, highlight.data.end) else {
        return None;
    };
    (start > 0 && end > start && end - start < MAX_SPAN_CHARS).then_some((start, end))
}
