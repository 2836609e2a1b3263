use serde::Serialize;

/// Payload for the analyze endpoint. Exactly one of `url`/`text` is
/// set, depending on submission mode.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub title: String,
    pub outlet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Sort direction for the narratives listing, by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrativeOrder {
    #[default]
    Desc,
    Asc,
}

impl NarrativeOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            NarrativeOrder::Desc => "desc",
            NarrativeOrder::Asc => "asc",
        }
    }
}

impl std::str::FromStr for NarrativeOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "desc" => Ok(NarrativeOrder::Desc),
            "asc" => Ok(NarrativeOrder::Asc),
            other => Err(format!("unknown order '{other}' (expected asc or desc)")),
        }
    }
}
