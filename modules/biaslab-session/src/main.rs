use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use biaslab_client::{BiasLabClient, NarrativeOrder};
use biaslab_common::scoring::{classify_opt, verdict, Dimension, OverallIndex};
use biaslab_common::types::{Article, ArticleId, Claim, Highlight, Narrative, ScoreSet};
use biaslab_common::{highlights, narratives, Config};
use biaslab_session::panel::Panel;
use biaslab_session::session::{DraftContent, Session, SubmissionDraft};

#[derive(Parser)]
#[command(name = "biaslab", about = "Media bias analysis console")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit an article for analysis and show the resulting report.
    Analyze {
        #[arg(long)]
        title: String,
        #[arg(long)]
        outlet: String,
        /// Article URL to fetch and analyze.
        #[arg(long, conflicts_with = "text")]
        url: Option<String>,
        /// Pasted article text to analyze instead of a URL.
        #[arg(long)]
        text: Option<String>,
        /// Include primary sources (slower).
        #[arg(long)]
        full: bool,
    },
    /// List recent articles.
    List,
    /// Show one article with its highlights and narratives.
    Show { id: String },
    /// Delete an article.
    Delete { id: String },
    /// List narrative clusters.
    Narratives {
        /// Sort direction by creation time: asc or desc.
        #[arg(long, default_value = "desc")]
        order: String,
    },
    /// Print the CSV export URL for an article.
    ExportUrl { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("biaslab=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let client = Arc::new(BiasLabClient::new(&config.api_base));
    let session = Session::new(client.clone(), config);

    match cli.command {
        Command::Analyze {
            title,
            outlet,
            url,
            text,
            full,
        } => {
            let content = match (url, text) {
                (Some(url), _) => DraftContent::Url(url),
                (None, Some(text)) => DraftContent::Text(text),
                // Validation below reports the missing field.
                (None, None) => DraftContent::Url(String::new()),
            };
            let draft = SubmissionDraft {
                title,
                outlet,
                content,
                include_primary: full,
            };
            let id = session.submit(&draft).await?;
            println!("Analyzed article {id}\n");

            let snapshot = session.snapshot();
            if let Some(report) = &snapshot.report {
                if let Some(summary) = &report.summary {
                    println!("Summary:\n  {summary}");
                }
                println!("\nBias score:");
                print_scores(&report.scores, snapshot.overall());
                print_claims(&report.claims);
            }
            print_highlights(&snapshot.highlights);
            let mine: Vec<Narrative> = snapshot
                .subject_narratives()
                .into_iter()
                .cloned()
                .collect();
            println!("\nNarratives:");
            print_narratives(&mine, &snapshot.article_cache);
        }
        Command::List => {
            session.load_initial().await;
            let snapshot = session.snapshot();
            match &snapshot.recent_articles {
                Panel::Ready(rows) => {
                    println!("{} article(s)", rows.len());
                    for article in rows {
                        print_article_row(article);
                    }
                }
                Panel::Unavailable(message) => println!("Articles unavailable: {message}"),
                Panel::Loading | Panel::Empty => println!("Nothing yet."),
            }
        }
        Command::Show { id } => {
            let id = ArticleId::from(id.as_str());
            let view = session.view_article(&id).await?;

            println!("Article {}", view.article.id);
            println!("{} — {}", view.article.title, view.article.outlet);
            if let Some(url) = &view.article.url {
                println!("{url}");
            }
            match &view.article.summary {
                Some(summary) => println!("\nSummary:\n  {summary}"),
                None => println!("\nNo summary available."),
            }
            println!("\nScores:");
            print_scores(&view.article.scores, None);

            println!("\nNarratives:");
            match &view.narratives {
                Panel::Ready(rows) => print_narratives(rows, &HashMap::new()),
                Panel::Unavailable(message) => println!("  Unavailable: {message}"),
                Panel::Loading | Panel::Empty => println!("  No narratives for this article."),
            }
            print_highlights(&view.highlights);
            println!("\nExport CSV: {}", client.export_csv_url(&id));
        }
        Command::Delete { id } => {
            let id = ArticleId::from(id.as_str());
            session.delete(&id).await?;
            println!("Deleted article {id}");
        }
        Command::Narratives { order } => {
            let order: NarrativeOrder = order.parse().map_err(anyhow::Error::msg)?;
            session.set_narrative_order(order).await;
            let snapshot = session.snapshot();
            match &snapshot.narratives {
                Panel::Ready(rows) => print_narratives(rows, &snapshot.article_cache),
                Panel::Unavailable(message) => println!("Narratives unavailable: {message}"),
                Panel::Loading | Panel::Empty => println!("No narratives yet."),
            }
        }
        Command::ExportUrl { id } => {
            println!("{}", client.export_csv_url(&ArticleId::from(id.as_str())));
        }
    }

    Ok(())
}

fn print_scores(scores: &ScoreSet, overall: Option<OverallIndex>) {
    if let Some(overall) = overall {
        println!(
            "  Overall: {:.0} • {} • {}",
            overall.value,
            overall.display_band().label(),
            verdict(overall.value)
        );
    }
    for (dimension, score) in scores.entries() {
        println!(
            "  {:<20} {:>5.0}  {}",
            dimension,
            score.unwrap_or(0.0),
            classify_opt(score)
        );
    }
}

fn print_claims(claims: &[Claim]) {
    if claims.is_empty() {
        return;
    }
    println!("\nClaims & primary sources:");
    for claim in claims {
        println!("- {}", claim.text);
        if let Some(rationale) = &claim.rationale {
            println!("    why: {rationale}");
        }
        println!("    confidence: {}%", claim.confidence_pct());
        for source in claim.display_sources() {
            println!("    source: {} <{}>", source.label(), source.url);
        }
    }
}

fn print_highlights(panel: &Panel<Vec<Highlight>>) {
    println!("\nHighlights:");
    match panel {
        Panel::Ready(rows) if rows.is_empty() => println!("  No highlights recorded."),
        Panel::Ready(rows) => {
            for highlight in rows {
                match highlights::display_range(highlight) {
                    Some((start, end)) => println!("- [{}] ({start}-{end})", highlight.dimension),
                    None => println!("- [{}]", highlight.dimension),
                }
                println!("    {}", highlight.data.text);
                if let Some(reason) = &highlight.data.reason {
                    println!("    why: {reason}");
                }
                if let Some(confidence) = highlight.data.confidence {
                    println!(
                        "    confidence: {}%",
                        (confidence.clamp(0.0, 1.0) * 100.0).round() as u32
                    );
                }
            }
        }
        Panel::Unavailable(message) => println!("  Unavailable: {message}"),
        Panel::Loading | Panel::Empty => println!("  No highlights recorded."),
    }
}

fn print_narratives(rows: &[Narrative], cache: &HashMap<ArticleId, Article>) {
    if rows.is_empty() {
        println!("  No narratives yet.");
        return;
    }
    for narrative in rows {
        match &narrative.created_at {
            Some(at) => println!("- {} ({})", narrative.label, at.format("%Y-%m-%d %H:%M")),
            None => println!("- {}", narrative.label),
        }
        if let Some(summary) = &narrative.data.summary {
            println!("    {summary}");
        }
        for article in narratives::resolve_linked(narrative, cache) {
            match &article.url {
                Some(url) => println!("    member: {} <{url}>", article.title),
                None => println!("    member: {}", article.title),
            }
        }
    }
}

fn print_article_row(article: &Article) {
    let scores = &article.scores;
    println!(
        "{}  {} [{}]  emo:{:.0} frame:{:.0} fact:{:.0}",
        article.id,
        article.title,
        article.outlet,
        scores.display_value(Dimension::EmotionalTone),
        scores.display_value(Dimension::FramingChoices),
        scores.display_value(Dimension::FactualGrounding),
    );
}
