use std::env;

/// Endpoint used when BIASLAB_API_BASE is not set.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the analysis API.
    pub api_base: String,
    /// Rows pulled into the recent-articles panel.
    pub article_page_size: u32,
    /// Highlights fetched per article.
    pub highlight_page_size: u32,
    /// Articles scanned to build the id map behind the narrative join.
    /// Wider than the visible page so narrative members off the first
    /// page still resolve.
    pub narrative_join_scan: u32,
}

impl Config {
    /// Load configuration from environment variables. Every var has a
    /// default; panics with a clear message on an unparseable number.
    pub fn from_env() -> Self {
        Self {
            api_base: env::var("BIASLAB_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            article_page_size: numeric_env("BIASLAB_ARTICLE_PAGE_SIZE", 50),
            highlight_page_size: numeric_env("BIASLAB_HIGHLIGHT_PAGE_SIZE", 50),
            narrative_join_scan: numeric_env("BIASLAB_NARRATIVE_JOIN_SCAN", 100),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            article_page_size: 50,
            highlight_page_size: 50,
            narrative_join_scan: 100,
        }
    }
}

fn numeric_env(key: &str, default: u32) -> u32 {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a number")),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_endpoint_and_pages() {
        let config = Config::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.article_page_size, 50);
        assert_eq!(config.highlight_page_size, 50);
        assert_eq!(config.narrative_join_scan, 100);
    }

    #[test]
    fn numeric_vars_parse_when_set() {
        env::set_var("BIASLAB_TEST_NUMERIC_KNOB", "25");
        assert_eq!(numeric_env("BIASLAB_TEST_NUMERIC_KNOB", 50), 25);
        env::remove_var("BIASLAB_TEST_NUMERIC_KNOB");
        assert_eq!(numeric_env("BIASLAB_TEST_NUMERIC_KNOB", 50), 50);
    }
}
