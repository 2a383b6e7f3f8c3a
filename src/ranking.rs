//! Relevance and similarity scoring.
//!
//! Every formula here is deterministic: identical inputs produce identical
//! scores, and every ordering breaks ties by ascending record id, so ranked
//! output is stable across repeated calls on unchanged data.

use std::collections::HashSet;

use crate::model::Context;
use crate::store::filter::searchable_text;

/// Weight per distinct shared tag — the primary similarity signal.
const TAG_OVERLAP_WEIGHT: f64 = 2.0;
/// Bonus when both records carry the same kind — the secondary signal.
const TYPE_MATCH_BONUS: f64 = 1.0;

/// Pairwise similarity of `candidate` against `anchor`.
///
/// `overlap × 2.0 + type bonus 1.0 + candidate relevanceScore`. The intrinsic
/// score lies in [0, 1], so it can only separate candidates whose structural
/// signals are equal — it is a tie-breaker, not a driver.
pub fn similarity(anchor: &Context, candidate: &Context) -> f64 {
    let anchor_tags: HashSet<&str> = anchor.metadata.tags.iter().map(String::as_str).collect();
    let overlap = candidate
        .metadata
        .tags
        .iter()
        .map(String::as_str)
        .collect::<HashSet<&str>>()
        .intersection(&anchor_tags)
        .count();

    let type_bonus = if candidate.kind == anchor.kind {
        TYPE_MATCH_BONUS
    } else {
        0.0
    };

    overlap as f64 * TAG_OVERLAP_WEIGHT + type_bonus + candidate.metadata.relevance_score
}

/// Top `limit` candidates by descending similarity to `anchor`, anchor
/// excluded, ties by ascending id.
pub fn top_similar(anchor: &Context, candidates: Vec<Context>, limit: usize) -> Vec<Context> {
    let mut scored: Vec<(f64, Context)> = candidates
        .into_iter()
        .filter(|c| c.id != anchor.id)
        .map(|c| (similarity(anchor, &c), c))
        .collect();

    scored.sort_by(|(sa, a), (sb, b)| sb.total_cmp(sa).then_with(|| a.id.cmp(&b.id)));
    scored.truncate(limit);
    scored.into_iter().map(|(_, c)| c).collect()
}

/// Graded match of a record against free query text.
///
/// The fraction of distinct, lowercased, whitespace-separated query terms
/// contained in the record's searchable text, multiplied by the record's
/// intrinsic relevance score. A record matching none of the terms scores 0
/// regardless of its intrinsic score; an empty query degenerates to the
/// intrinsic score alone.
pub fn text_relevance(ctx: &Context, query: &str) -> f64 {
    let terms: HashSet<String> = query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if terms.is_empty() {
        return ctx.metadata.relevance_score;
    }

    let haystack = searchable_text(ctx);
    let matched = terms.iter().filter(|t| haystack.contains(t.as_str())).count();

    (matched as f64 / terms.len() as f64) * ctx.metadata.relevance_score
}

/// Re-order an already-filtered result set by how well each record matches
/// `query`, descending, ties by ascending id.
pub fn rank_by_relevance(mut contexts: Vec<Context>, query: &str) -> Vec<Context> {
    contexts.sort_by(|a, b| {
        text_relevance(b, query)
            .total_cmp(&text_relevance(a, query))
            .then_with(|| a.id.cmp(&b.id))
    });
    contexts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContextPayload, ContextType, MetadataPayload};
    use chrono::Utc;

    fn ctx(id: &str, kind: ContextType, tags: &[&str], score: f64, content: &str) -> Context {
        ContextPayload {
            id: Some(id.into()),
            kind,
            content: content.into(),
            metadata: MetadataPayload {
                title: format!("title {id}"),
                description: None,
                tags: tags.iter().map(|t| t.to_string()).collect(),
                language: None,
                contract_type: None,
                author: None,
                relevance_score: Some(score),
            },
            related_context_ids: vec![],
        }
        .into_context(Utc::now())
    }

    #[test]
    fn tag_overlap_outweighs_type_match() {
        let anchor = ctx("a", ContextType::CodeExample, &["storage", "mapper"], 0.8, "");
        let shares_tag = ctx("b", ContextType::Documentation, &["storage"], 0.1, "");
        let shares_type = ctx("c", ContextType::CodeExample, &["events"], 1.0, "");

        assert!(similarity(&anchor, &shares_tag) > similarity(&anchor, &shares_type));
    }

    #[test]
    fn duplicate_tags_count_once() {
        let anchor = ctx("a", ContextType::CodeExample, &["storage"], 0.5, "");
        let duplicated = ctx("b", ContextType::BestPractice, &["storage", "storage"], 0.0, "");
        let single = ctx("c", ContextType::BestPractice, &["storage"], 0.0, "");

        assert_eq!(
            similarity(&anchor, &duplicated),
            similarity(&anchor, &single)
        );
    }

    #[test]
    fn top_similar_excludes_anchor_and_caps() {
        let anchor = ctx("anchor", ContextType::CodeExample, &["storage"], 0.5, "");
        let pool = vec![
            anchor.clone(),
            ctx("x", ContextType::CodeExample, &["storage"], 0.5, ""),
            ctx("y", ContextType::CodeExample, &["storage"], 0.5, ""),
            ctx("z", ContextType::CodeExample, &["storage"], 0.5, ""),
        ];

        let similar = top_similar(&anchor, pool, 2);
        assert_eq!(similar.len(), 2);
        assert!(similar.iter().all(|c| c.id != "anchor"));
        // Equal scores resolve by ascending id.
        assert_eq!(similar[0].id, "x");
        assert_eq!(similar[1].id, "y");
    }

    #[test]
    fn text_relevance_is_fraction_times_intrinsic() {
        let record = ctx(
            "r",
            ContextType::CodeExample,
            &[],
            0.5,
            "payable endpoint with storage mapper",
        );
        // One of two terms present.
        let score = text_relevance(&record, "payable missingterm");
        assert!((score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn rank_by_relevance_puts_matches_above_high_intrinsic_non_matches() {
        let matching = ctx("m", ContextType::CodeExample, &[], 0.2, "payable endpoint");
        let non_matching = ctx("n", ContextType::CodeExample, &[], 1.0, "unrelated body");

        let ranked = rank_by_relevance(vec![non_matching, matching], "payable");
        assert_eq!(ranked[0].id, "m");
    }

    #[test]
    fn empty_query_falls_back_to_intrinsic_order() {
        let low = ctx("low", ContextType::CodeExample, &[], 0.2, "a");
        let high = ctx("high", ContextType::CodeExample, &[], 0.9, "b");

        let ranked = rank_by_relevance(vec![low, high], "   ");
        assert_eq!(ranked[0].id, "high");
    }
}
