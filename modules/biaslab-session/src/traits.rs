// Trait abstraction over the analysis API.
//
// AnalysisBackend is the one seam between the view session and the
// network. The production impl is BiasLabClient; tests swap in an
// in-memory backend with latched responses, so response-ordering races
// are reproduced deterministically without a server.

use async_trait::async_trait;

use biaslab_client::{AnalyzeRequest, BiasLabClient, NarrativeOrder, Result};
use biaslab_common::types::{AnalysisReport, Article, ArticleId, Highlight, Narrative};

#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit an article for analysis and wait for the report.
    async fn analyze(&self, request: &AnalyzeRequest, full: bool) -> Result<AnalysisReport>;

    /// Most-recent-first article listing.
    async fn list_articles(&self, limit: u32) -> Result<Vec<Article>>;

    /// Single article with nested scores and summary.
    async fn get_article(&self, id: &ArticleId) -> Result<Article>;

    async fn delete_article(&self, id: &ArticleId) -> Result<()>;

    async fn list_highlights(&self, article_id: &ArticleId, limit: u32) -> Result<Vec<Highlight>>;

    async fn list_narratives(&self, order: NarrativeOrder) -> Result<Vec<Narrative>>;

    /// Advisory clustering kick; callers swallow the outcome.
    async fn trigger_clustering(&self) -> Result<()>;
}

#[async_trait]
impl AnalysisBackend for BiasLabClient {
    async fn analyze(&self, request: &AnalyzeRequest, full: bool) -> Result<AnalysisReport> {
        BiasLabClient::analyze(self, request, full).await
    }

    async fn list_articles(&self, limit: u32) -> Result<Vec<Article>> {
        BiasLabClient::list_articles(self, limit).await
    }

    async fn get_article(&self, id: &ArticleId) -> Result<Article> {
        BiasLabClient::get_article(self, id).await
    }

    async fn delete_article(&self, id: &ArticleId) -> Result<()> {
        BiasLabClient::delete_article(self, id).await
    }

    async fn list_highlights(&self, article_id: &ArticleId, limit: u32) -> Result<Vec<Highlight>> {
        BiasLabClient::list_highlights(self, article_id, limit).await
    }

    async fn list_narratives(&self, order: NarrativeOrder) -> Result<Vec<Narrative>> {
        BiasLabClient::list_narratives(self, order).await
    }

    async fn trigger_clustering(&self) -> Result<()> {
        BiasLabClient::trigger_clustering(self).await
    }
}
