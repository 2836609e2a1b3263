use std::collections::HashMap;

use crate::types::{Article, ArticleId, Narrative};

/// Narratives whose member list references the given article, in input
/// order. Callers pick the sort direction at fetch time; this never
/// re-sorts.
pub fn for_article<'a>(narratives: &'a [Narrative], article_id: &ArticleId) -> Vec<&'a Narrative> {
    narratives
        .iter()
        .filter(|n| n.data.article_ids.contains(article_id))
        .collect()
}

/// Resolve a narrative's member ids against the local article cache.
/// Ids without a cached article are skipped: the narrative and article
/// stores paginate independently, so a member may be deleted or simply
/// not loaded yet.
pub fn resolve_linked<'a>(
    narrative: &Narrative,
    articles: &'a HashMap<ArticleId, Article>,
) -> Vec<&'a Article> {
    narrative
        .data
        .article_ids
        .iter()
        .filter_map(|id| articles.get(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NarrativeData, NarrativeId, ScoreSet};

    fn narrative(id: &str, members: &[&str]) -> Narrative {
        Narrative {
            id: NarrativeId(id.to_string()),
            label: format!("narrative {id}"),
            created_at: None,
            data: NarrativeData {
                article_ids: members.iter().map(|m| ArticleId::from(*m)).collect(),
                summary: None,
            },
        }
    }

    fn article(id: &str) -> Article {
        Article {
            id: ArticleId::from(id),
            title: format!("article {id}"),
            outlet: "Outlet".to_string(),
            url: None,
            text: None,
            summary: None,
            scores: ScoreSet::default(),
            created_at: None,
        }
    }

    #[test]
    fn returns_only_narratives_referencing_the_article() {
        let rows = vec![
            narrative("n1", &["a1", "a2"]),
            narrative("n2", &["a3"]),
            narrative("n3", &["a2", "a1"]),
        ];
        let mine = for_article(&rows, &ArticleId::from("a1"));
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id.0, "n1");
        assert_eq!(mine[1].id.0, "n3");
    }

    #[test]
    fn empty_when_nothing_references_the_article() {
        let rows = vec![narrative("n1", &["a1"]), narrative("n2", &[])];
        assert!(for_article(&rows, &ArticleId::from("zz")).is_empty());
    }

    #[test]
    fn preserves_input_order_regardless_of_direction() {
        let asc = vec![narrative("old", &["a1"]), narrative("new", &["a1"])];
        let desc: Vec<Narrative> = asc.iter().rev().cloned().collect();

        let from_asc: Vec<&str> = for_article(&asc, &ArticleId::from("a1"))
            .iter()
            .map(|n| n.id.0.as_str())
            .collect();
        let from_desc: Vec<&str> = for_article(&desc, &ArticleId::from("a1"))
            .iter()
            .map(|n| n.id.0.as_str())
            .collect();

        assert_eq!(from_asc, vec!["old", "new"]);
        assert_eq!(from_desc, vec!["new", "old"]);
    }

    #[test]
    fn unresolvable_member_ids_are_dropped_silently() {
        let cache: HashMap<ArticleId, Article> = [article("a1"), article("a3")]
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect();

        let n = narrative("n1", &["a1", "a2", "a3"]);
        let linked = resolve_linked(&n, &cache);
        let ids: Vec<&str> = linked.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a3"]);
    }
}
