use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use biaslab_client::{AnalyzeRequest, NarrativeOrder};
use biaslab_common::scoring::{aggregate, OverallIndex};
use biaslab_common::types::{AnalysisReport, Article, ArticleId, Highlight, Narrative};
use biaslab_common::{highlights, narratives, Config};

use crate::disclosure::DisclosureSync;
use crate::error::SessionError;
use crate::panel::Panel;
use crate::traits::AnalysisBackend;

/// Where the submission state machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// What the user typed into the analyze form.
#[derive(Debug, Clone)]
pub struct SubmissionDraft {
    pub title: String,
    pub outlet: String,
    pub content: DraftContent,
    /// Ask the engine to also chase primary sources (slower).
    pub include_primary: bool,
}

/// Submission mode: a URL to scrape, or pasted article text.
#[derive(Debug, Clone)]
pub enum DraftContent {
    Url(String),
    Text(String),
}

impl SubmissionDraft {
    /// Fail-fast field validation. Nothing reaches the network until
    /// this passes.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.title.trim().is_empty() {
            return Err(SessionError::Validation("title is required".to_string()));
        }
        if self.outlet.trim().is_empty() {
            return Err(SessionError::Validation("outlet is required".to_string()));
        }
        match &self.content {
            DraftContent::Url(url) if url.trim().is_empty() => {
                Err(SessionError::Validation("url is required".to_string()))
            }
            DraftContent::Text(text) if text.trim().is_empty() => {
                Err(SessionError::Validation("text is required".to_string()))
            }
            _ => Ok(()),
        }
    }

    fn to_request(&self) -> AnalyzeRequest {
        let (url, text) = match &self.content {
            DraftContent::Url(url) => (Some(url.trim().to_string()), None),
            DraftContent::Text(text) => (None, Some(text.trim().to_string())),
        };
        AnalyzeRequest {
            title: self.title.trim().to_string(),
            outlet: self.outlet.trim().to_string(),
            url,
            text,
        }
    }
}

/// Sequence tokens, one per independently-fetched panel. Bumped under
/// the state lock when a fetch is issued; a completing fetch applies
/// its result only while its token is still current, so the last-issued
/// request wins regardless of response order.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FetchSeq {
    pub(crate) highlights: u64,
    pub(crate) narratives: u64,
    pub(crate) articles: u64,
}

/// Everything the view renders. Collections are replaced wholesale per
/// fetch, never edited in place.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub phase: Phase,
    /// Message from the last failed submission, if any.
    pub submit_error: Option<String>,
    /// The article just analyzed or being viewed; the staleness key for
    /// every dependent fetch.
    pub subject: Option<ArticleId>,
    pub report: Option<AnalysisReport>,
    pub highlights: Panel<Vec<Highlight>>,
    pub narratives: Panel<Vec<Narrative>>,
    pub recent_articles: Panel<Vec<Article>>,
    /// id → article map behind the narrative join. Replaced wholesale
    /// on a successful narrative scan.
    pub article_cache: HashMap<ArticleId, Article>,
    pub narrative_order: NarrativeOrder,
    pub claims_disclosure: DisclosureSync,
    pub highlights_disclosure: DisclosureSync,
    pub(crate) seq: FetchSeq,
}

impl ViewState {
    /// The overall index for display: the server's verbatim when it
    /// sent one, else derived from the dimension scores by the shared
    /// classifier weights.
    pub fn overall(&self) -> Option<OverallIndex> {
        let report = self.report.as_ref()?;
        Some(report.overall.unwrap_or_else(|| aggregate(&report.scores)))
    }

    /// Narratives referencing the current subject, in fetch order.
    pub fn subject_narratives(&self) -> Vec<&Narrative> {
        match (&self.subject, self.narratives.ready()) {
            (Some(id), Some(rows)) => narratives::for_article(rows, id),
            _ => Vec::new(),
        }
    }

    /// Member articles of a narrative that resolve against the cache.
    pub fn linked_articles(&self, narrative: &Narrative) -> Vec<&Article> {
        narratives::resolve_linked(narrative, &self.article_cache)
    }
}

/// The article detail view, assembled from three independent fetches.
#[derive(Debug, Clone)]
pub struct ArticleView {
    pub article: Article,
    pub highlights: Panel<Vec<Highlight>>,
    pub narratives: Panel<Vec<Narrative>>,
}

/// Coordinates the fetch cycle for one active view session.
///
/// Cheap to clone; clones share state. Every fetch carries the sequence
/// token current at issue time and is discarded on completion if a
/// newer fetch for the same panel was issued meanwhile, so a slow
/// response for one subject can never render over a newer one.
/// Discards are cooperative: nothing is aborted, a superseded response
/// is simply never applied.
#[derive(Clone)]
pub struct Session {
    backend: Arc<dyn AnalysisBackend>,
    config: Config,
    state: Arc<Mutex<ViewState>>,
}

impl Session {
    pub fn new(backend: Arc<dyn AnalysisBackend>, config: Config) -> Self {
        Self {
            backend,
            config,
            state: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    /// Point-in-time copy of the view state.
    pub fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    /// Submit the analyze form. On success the analyzed article becomes
    /// the current subject and the dependent panels refetch; on failure
    /// previously displayed data is left untouched and only the error
    /// message changes.
    pub async fn submit(&self, draft: &SubmissionDraft) -> Result<ArticleId, SessionError> {
        draft.validate()?;

        {
            let mut state = self.lock();
            if state.phase == Phase::Submitting {
                return Err(SessionError::SubmissionInFlight);
            }
            state.phase = Phase::Submitting;
            state.submit_error = None;
        }

        let request = draft.to_request();
        let report = match self.backend.analyze(&request, draft.include_primary).await {
            Ok(report) => report,
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "Analysis submission failed");
                let mut state = self.lock();
                state.phase = Phase::Failed;
                state.submit_error = Some(message);
                return Err(e.into());
            }
        };

        let id = report.id.clone();
        info!(article_id = %id, "Analysis complete, refreshing dependent panels");
        let (tokens, order) = {
            let mut state = self.lock();
            state.phase = Phase::Succeeded;
            state.subject = Some(id.clone());
            state.report = Some(report);
            // Panels keyed to the previous subject must not linger; the
            // recent list is subject-independent and keeps its rows
            // while revalidating.
            state.highlights = Panel::Loading;
            state.narratives = Panel::Loading;
            // Fresh lists get fresh disclosure state.
            state.claims_disclosure = DisclosureSync::new();
            state.highlights_disclosure = DisclosureSync::new();
            state.seq.highlights += 1;
            state.seq.narratives += 1;
            state.seq.articles += 1;
            (state.seq, state.narrative_order)
        };

        tokio::join!(
            self.fetch_highlights(tokens.highlights, &id),
            self.fetch_narratives(tokens.narratives, order, true),
            self.fetch_recent(tokens.articles),
        );

        Ok(id)
    }

    /// First fetch for a fresh session: recent articles plus the
    /// narrative overview. No clustering trigger without a subject.
    pub async fn load_initial(&self) {
        let (articles_token, narratives_token, order) = {
            let mut state = self.lock();
            if state.recent_articles.is_empty() {
                state.recent_articles = Panel::Loading;
            }
            if state.narratives.is_empty() {
                state.narratives = Panel::Loading;
            }
            state.seq.articles += 1;
            state.seq.narratives += 1;
            (state.seq.articles, state.seq.narratives, state.narrative_order)
        };

        tokio::join!(
            self.fetch_recent(articles_token),
            self.fetch_narratives(narratives_token, order, false),
        );
    }

    /// Re-read narratives in the requested direction. The resolver
    /// downstream never re-sorts; direction is decided here, at fetch
    /// time. The latest requested order wins if calls overlap.
    pub async fn set_narrative_order(&self, order: NarrativeOrder) {
        let (token, trigger) = {
            let mut state = self.lock();
            state.narrative_order = order;
            state.narratives = Panel::Loading;
            state.seq.narratives += 1;
            (state.seq.narratives, state.subject.is_some())
        };
        self.fetch_narratives(token, order, trigger).await;
    }

    /// Delete an article, then revalidate the recent list.
    pub async fn delete(&self, id: &ArticleId) -> Result<(), SessionError> {
        self.backend.delete_article(id).await?;
        let token = {
            let mut state = self.lock();
            state.seq.articles += 1;
            state.seq.articles
        };
        self.fetch_recent(token).await;
        Ok(())
    }

    /// Assemble the detail view for one article. Sections degrade
    /// independently; the detail fetch falls back to the cached list
    /// row before giving up.
    pub async fn view_article(&self, id: &ArticleId) -> Result<ArticleView, SessionError> {
        let (detail, highlight_rows, narrative_rows) = tokio::join!(
            self.backend.get_article(id),
            self.backend
                .list_highlights(id, self.config.highlight_page_size),
            self.backend.list_narratives(NarrativeOrder::Desc),
        );

        let article = match detail {
            Ok(article) => article,
            Err(e) => match self.lock().article_cache.get(id) {
                Some(cached) => {
                    debug!(article_id = %id, error = %e, "Detail fetch failed, using cached row");
                    cached.clone()
                }
                None => return Err(e.into()),
            },
        };

        let highlight_panel = match highlight_rows {
            Ok(rows) => Panel::Ready(highlights::sanitize(rows)),
            Err(e) => Panel::Unavailable(e.to_string()),
        };
        let narrative_panel = match narrative_rows {
            Ok(rows) => Panel::Ready(
                narratives::for_article(&rows, id)
                    .into_iter()
                    .cloned()
                    .collect(),
            ),
            Err(e) => Panel::Unavailable(e.to_string()),
        };

        Ok(ArticleView {
            article,
            highlights: highlight_panel,
            narratives: narrative_panel,
        })
    }

    pub fn toggle_all_claims(&self) {
        self.lock().claims_disclosure.toggle_all();
    }

    pub fn toggle_all_highlights(&self) {
        self.lock().highlights_disclosure.toggle_all();
    }

    async fn fetch_highlights(&self, token: u64, subject: &ArticleId) {
        let result = self
            .backend
            .list_highlights(subject, self.config.highlight_page_size)
            .await;

        let mut state = self.lock();
        if state.seq.highlights != token {
            debug!(article_id = %subject, "Discarding stale highlights response");
            return;
        }
        state.highlights = match result {
            Ok(rows) => Panel::Ready(highlights::sanitize(rows)),
            Err(e) => {
                warn!(error = %e, "Highlights fetch failed");
                Panel::Unavailable(e.to_string())
            }
        };
    }

    async fn fetch_narratives(&self, token: u64, order: NarrativeOrder, trigger_clustering: bool) {
        if trigger_clustering {
            // Advisory; the narrative list renders with or without it.
            if let Err(e) = self.backend.trigger_clustering().await {
                debug!(error = %e, "Clustering trigger failed, continuing");
            }
        }

        let (narrative_rows, article_scan) = tokio::join!(
            self.backend.list_narratives(order),
            self.backend.list_articles(self.config.narrative_join_scan),
        );

        let mut state = self.lock();
        if state.seq.narratives != token {
            debug!("Discarding stale narratives response");
            return;
        }
        match (narrative_rows, article_scan) {
            (Ok(rows), Ok(scan)) => {
                state.article_cache = scan.into_iter().map(|a| (a.id.clone(), a)).collect();
                state.narratives = Panel::Ready(rows);
            }
            (Err(e), _) | (Ok(_), Err(e)) => {
                warn!(error = %e, "Narratives fetch failed");
                state.narratives = Panel::Unavailable(e.to_string());
                state.article_cache = HashMap::new();
            }
        }
    }

    async fn fetch_recent(&self, token: u64) {
        let result = self.backend.list_articles(self.config.article_page_size).await;

        let mut state = self.lock();
        if state.seq.articles != token {
            debug!("Discarding stale article list response");
            return;
        }
        state.recent_articles = match result {
            Ok(rows) => Panel::Ready(rows),
            Err(e) => {
                warn!(error = %e, "Article list fetch failed");
                Panel::Unavailable(e.to_string())
            }
        };
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().expect("view state lock poisoned")
    }
}
