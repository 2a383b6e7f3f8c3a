use crate::protocol::{QueryContextsParams, StoreErrorResponse, ToolResult};
use crate::service::ContextService;

/// Handle a `context.query` tool call.
///
/// Delegates filtering, ordering, and pagination to the store. With
/// `rankByQuery` set, the `query` text is lifted out of the filter chain and
/// applied as a graded re-ranking of the returned page instead — the shape a
/// caller wants when filtering by tags or type but ordering by how well each
/// record matches a phrase.
pub async fn handle(params: QueryContextsParams, service: &ContextService) -> ToolResult {
    let mut filter = params.filter;

    let rank_query = if params.rank_by_query {
        filter.query.take()
    } else {
        None
    };

    let mut response = match service.query(filter).await {
        Ok(r) => r,
        Err(err) => return StoreErrorResponse::from(err).into(),
    };

    if let Some(query) = rank_query {
        response.results = service.rank_by_relevance(response.results, &query);
    }

    ToolResult::json(&response)
}
