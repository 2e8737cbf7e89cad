//! Paginated execution of policy listings
//!
//! Runs a count and a page query built from the same conjunction on one
//! connection and returns the raw rows with the total match count.

use domain_policy::{Conjunction, Pagination};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::debug;

use super::predicate::push_predicate;
use super::{COUNT_POLICIES, ORDER_NEWEST_FIRST, SELECT_POLICY_RECORD};
use crate::error::DatabaseError;
use crate::rows::PolicyJoinedRow;

/// One page of joined policy rows and the unpaginated match count
#[derive(Debug, Default)]
pub struct RowPage {
    pub rows: Vec<PolicyJoinedRow>,
    pub total_count: u64,
}

/// Builds the count query for `conjunction`
pub fn count_query(conjunction: &Conjunction) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(COUNT_POLICIES);
    push_predicate(&mut builder, conjunction);
    builder
}

/// Builds the page query for `conjunction`, newest first
pub fn page_query(
    conjunction: &Conjunction,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_POLICY_RECORD);
    push_predicate(&mut builder, conjunction);
    builder.push(ORDER_NEWEST_FIRST);
    builder
        .push(" LIMIT ")
        .push_bind(pagination.limit())
        .push(" OFFSET ")
        .push_bind(pagination.offset());
    builder
}

/// Counts the matches, then fetches the requested page
///
/// # Errors
///
/// Propagates any store failure; callers decide whether to degrade.
pub async fn fetch_page(
    conn: &mut PgConnection,
    conjunction: &Conjunction,
    pagination: Pagination,
) -> Result<RowPage, DatabaseError> {
    let total_raw: i64 = count_query(conjunction)
        .build_query_scalar()
        .fetch_one(&mut *conn)
        .await?;
    let total_count = u64::try_from(total_raw).unwrap_or(0);

    let rows = page_query(conjunction, pagination)
        .build_query_as::<PolicyJoinedRow>()
        .fetch_all(&mut *conn)
        .await?;

    debug!(
        total_count,
        returned = rows.len(),
        offset = pagination.offset(),
        "Fetched policy page"
    );

    Ok(RowPage { rows, total_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_policy::{PageRequest, PolicyFilter, PolicyType};

    #[test]
    fn test_count_and_page_share_the_predicate() {
        let conjunction = PolicyFilter::new().of_type(PolicyType::Home).to_predicate();

        let count = count_query(&conjunction);
        let page = page_query(&conjunction, PageRequest::new(2, 5).normalize());

        assert!(count.sql().ends_with("FROM policy WHERE policy.type = $1"));
        assert!(page.sql().contains("WHERE policy.type = $1 ORDER BY"));
    }

    #[test]
    fn test_page_is_ordered_then_limited() {
        let page = page_query(&Conjunction::default(), PageRequest::default().normalize());
        assert!(page.sql().ends_with(
            "ORDER BY policy.created_at DESC, policy.id DESC LIMIT $1 OFFSET $2"
        ));
    }
}
