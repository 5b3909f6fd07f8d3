//! Deferred query slicing
//!
//! One count round trip, then at most one bounded range round trip. The
//! range query is skipped whenever the window is already known to be empty.

use super::async_page::{AsyncPage, AsyncPagedList};
use super::types::{BoundedQuery, QuerySource};
use crate::error::Result;
use crate::math;
use crate::page::{EmptyPagedList, Page};
use crate::slicing::{PageRequest, Slice};
use crate::types::{Capability, TotalCount};
use futures::stream::{self, StreamExt};

/// Narrow `query` to one page without executing it.
///
/// With [`TotalCount::Known`] the source is never touched; with
/// [`TotalCount::Compute`] only the count round trip is issued.
pub async fn to_bounded_query<Q: QuerySource>(
    query: Q,
    page_number: usize,
    page_size: usize,
    total_item_count: TotalCount,
    adjust_last_page_when_exceeding: bool,
) -> Result<BoundedQuery<Q>> {
    math::validate_page_number(page_number)?;
    math::validate_page_size(page_size)?;

    let total_item_count = match total_item_count {
        TotalCount::Known(total) => total,
        TotalCount::Compute => {
            let total = query.count().await?;
            tracing::debug!(total_item_count = total, "Counted deferred query");
            total
        }
    };

    let (page_number, range) = math::resolve(
        page_number,
        page_size,
        total_item_count,
        adjust_last_page_when_exceeding,
    )?;

    Ok(BoundedQuery {
        query: query.skip(range.from).take(page_size),
        page_number,
        total_item_count,
        item_count_on_page: range.count,
    })
}

/// Materialize one page of a deferred query
pub async fn query_to_page<Q: QuerySource>(
    query: Q,
    request: PageRequest,
) -> Result<Page<Q::Item>> {
    request.validate()?;
    log_request(&request);

    let bounded = to_bounded_query(
        query,
        request.page_number,
        request.page_size,
        TotalCount::Compute,
        request.adjust_last_page_when_exceeding,
    )
    .await?;

    if bounded.total_item_count == 0 {
        return Ok(EmptyPagedList::new(request.page_size)?.into());
    }

    let items = if bounded.item_count_on_page == 0 {
        Vec::new()
    } else {
        tracing::debug!(
            page_number = bounded.page_number,
            take = bounded.item_count_on_page,
            "Fetching deferred page range"
        );
        bounded.query.fetch().await?
    };

    Slice {
        items,
        page_number: bounded.page_number,
        total_item_count: bounded.total_item_count,
    }
    .into_page(request.page_size)
}

/// Count now, fetch later: the returned page streams its items on demand
pub async fn query_to_async_page<Q: QuerySource>(
    query: Q,
    request: PageRequest,
    cache_items: bool,
) -> Result<AsyncPage<Q::Item>> {
    request.validate()?;
    log_request(&request);

    let bounded = to_bounded_query(
        query,
        request.page_number,
        request.page_size,
        TotalCount::Compute,
        request.adjust_last_page_when_exceeding,
    )
    .await?;

    if bounded.total_item_count == 0 {
        return Ok(EmptyPagedList::new(request.page_size)?.into());
    }

    let subset = if bounded.item_count_on_page == 0 {
        stream::empty().boxed()
    } else {
        bounded.query.into_stream()
    };

    let list = AsyncPagedList::new(
        subset,
        bounded.item_count_on_page,
        bounded.page_number,
        request.page_size,
        bounded.total_item_count,
        cache_items,
    )?;
    Ok(list.into())
}

fn log_request(request: &PageRequest) {
    let capability = Capability::DeferredQuery;
    tracing::debug!(
        %capability,
        page_number = request.page_number,
        page_size = request.page_size,
        adjust = request.adjust_last_page_when_exceeding,
        "Slicing superset"
    );
}
