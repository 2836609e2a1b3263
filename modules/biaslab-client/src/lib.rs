pub mod error;
pub mod types;

pub use error::{ApiError, Result};
pub use types::{AnalyzeRequest, NarrativeOrder};

use serde::de::DeserializeOwned;
use tracing::debug;

use biaslab_common::types::{AnalysisReport, Article, ArticleId, Highlight, Narrative};

pub struct BiasLabClient {
    client: reqwest::Client,
    base_url: String,
}

impl BiasLabClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Most-recent-first article listing.
    pub async fn list_articles(&self, limit: u32) -> Result<Vec<Article>> {
        self.get_json(&format!("/articles?limit={limit}")).await
    }

    /// Single article with nested scores and summary.
    pub async fn get_article(&self, id: &ArticleId) -> Result<Article> {
        self.get_json(&format!("/articles/{id}")).await
    }

    /// Any 2xx counts as a successful delete.
    pub async fn delete_article(&self, id: &ArticleId) -> Result<()> {
        let url = format!("{}/articles/{}", self.base_url, id);
        let resp = self.client.delete(&url).send().await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        debug!(article_id = %id, "Article deleted");
        Ok(())
    }

    /// Submit an article for analysis. `full` asks the engine to also
    /// chase primary sources (slower).
    pub async fn analyze(&self, request: &AnalyzeRequest, full: bool) -> Result<AnalysisReport> {
        let url = format!("{}/analyze?full={full}", self.base_url);
        let resp = self.client.post(&url).json(request).send().await?;
        read_json(resp).await
    }

    pub async fn list_highlights(
        &self,
        article_id: &ArticleId,
        limit: u32,
    ) -> Result<Vec<Highlight>> {
        self.get_json(&format!(
            "/highlights?article_id={}&limit={}",
            urlencoding::encode(article_id.as_str()),
            limit
        ))
        .await
    }

    pub async fn list_narratives(&self, order: NarrativeOrder) -> Result<Vec<Narrative>> {
        self.get_json(&format!("/narratives?order={}", order.as_str()))
            .await
    }

    /// Ask the server to re-run narrative clustering. Advisory; callers
    /// typically discard the outcome and list narratives regardless.
    pub async fn trigger_clustering(&self) -> Result<()> {
        let url = format!("{}/narratives/cluster", self.base_url);
        let resp = self.client.post(&url).send().await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }

    /// URL of the CSV export for one article. The download itself is
    /// handled by whatever the caller hands the URL to.
    pub fn export_csv_url(&self, id: &ArticleId) -> String {
        format!("{}/articles/{}/export.csv", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).send().await?;
        read_json(resp).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    if !resp.status().is_success() {
        return Err(error_from_response(resp).await);
    }
    Ok(resp.json().await?)
}

/// Non-2xx responses usually carry `{"detail": "..."}`. Fall back to
/// the status line when the body is missing or not JSON.
async fn error_from_response(resp: reqwest::Response) -> ApiError {
    let status = resp.status();
    let fallback = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("error")
    );
    let body = resp.text().await.unwrap_or_default();
    let message = detail_message(&body).unwrap_or(fallback);
    ApiError::Api {
        status: status.as_u16(),
        message,
    }
}

fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(String::from)
}
