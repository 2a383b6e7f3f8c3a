//! Shared query pipeline: filter, order, page.
//!
//! Both storage backends feed their records (in insertion order) through
//! these helpers, which keeps their observable query semantics identical.

use crate::model::{Context, QueryParams};

/// Apply the filter chain to insertion-ordered records, then sort by
/// relevance score descending. The sort is stable, so relevance ties keep
/// insertion order.
pub fn filter_and_order(records: Vec<Context>, params: &QueryParams) -> Vec<Context> {
    let mut matched: Vec<Context> = records
        .into_iter()
        .filter(|ctx| matches(ctx, params))
        .collect();
    matched.sort_by(|a, b| {
        b.metadata
            .relevance_score
            .total_cmp(&a.metadata.relevance_score)
    });
    matched
}

/// Slice the contiguous page `[offset, offset + limit)`.
pub fn paginate(records: Vec<Context>, offset: usize, limit: usize) -> Vec<Context> {
    records.into_iter().skip(offset).take(limit).collect()
}

/// Whether one record passes every requested filter.
pub fn matches(ctx: &Context, params: &QueryParams) -> bool {
    if let Some(types) = &params.types {
        if !types.is_empty() && !types.contains(&ctx.kind) {
            return false;
        }
    }

    // OR semantics: one shared tag is enough.
    if let Some(tags) = &params.tags {
        if !tags.is_empty() && !tags.iter().any(|t| ctx.metadata.tags.contains(t)) {
            return false;
        }
    }

    if let Some(contract_type) = &params.contract_type {
        if ctx.metadata.contract_type.as_deref() != Some(contract_type.as_str()) {
            return false;
        }
    }

    if let Some(query) = &params.query {
        let needle = query.to_lowercase();
        if !needle.is_empty() && !searchable_text(ctx).contains(&needle) {
            return false;
        }
    }

    true
}

/// Lowercased concatenation of every text field a free-text query can hit:
/// content, title, description, and the joined tags.
pub fn searchable_text(ctx: &Context) -> String {
    let mut text = String::with_capacity(
        ctx.content.len() + ctx.metadata.title.len() + 64,
    );
    text.push_str(&ctx.content);
    text.push(' ');
    text.push_str(&ctx.metadata.title);
    if let Some(description) = &ctx.metadata.description {
        text.push(' ');
        text.push_str(description);
    }
    if !ctx.metadata.tags.is_empty() {
        text.push(' ');
        text.push_str(&ctx.metadata.tags.join(" "));
    }
    text.to_lowercase()
}
