//! Policy repository implementation
//!
//! This module provides database access for policy records. Reads return
//! [`PolicyRecord`]s; mapping to domain policies happens in the adapter.

use std::collections::HashMap;

use domain_policy::{Conjunction, Pagination};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::query::{fetch_page, ORDER_NEWEST_FIRST, SELECT_POLICY_RECORD};
use crate::rows::{CoverageRow, NewPolicyRows, PolicyJoinedRow, PolicyRecord};

/// Repository for policy records and the rows they own
///
/// Every method acquires its own connection or transaction from the pool
/// and releases it on return.
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::repositories::PolicyRepository;
///
/// let repo = PolicyRepository::new(pool);
/// let record = repo.find_by_number("POL-1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    /// Creates a new PolicyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves every policy record, newest first
    pub async fn find_all(&self) -> Result<Vec<PolicyRecord>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let sql = format!("{SELECT_POLICY_RECORD}{ORDER_NEWEST_FIRST}");
        let rows = sqlx::query_as::<_, PolicyJoinedRow>(&sql)
            .fetch_all(&mut *conn)
            .await?;

        attach_coverages(&mut conn, rows).await
    }

    /// Retrieves the policy record with the given number, if any
    pub async fn find_by_number(
        &self,
        policy_number: &str,
    ) -> Result<Option<PolicyRecord>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        fetch_by_number(&mut conn, policy_number).await
    }

    /// Retrieves one page of records matching `conjunction` and the total
    /// number of matches
    pub async fn find_page(
        &self,
        conjunction: &Conjunction,
        pagination: Pagination,
    ) -> Result<(Vec<PolicyRecord>, u64), DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let page = fetch_page(&mut conn, conjunction, pagination).await?;
        let records = attach_coverages(&mut conn, page.rows).await?;

        Ok((records, page.total_count))
    }

    /// Inserts all rows of a new policy in one transaction
    ///
    /// Returns the record as stored. The transaction rolls back if any
    /// statement fails.
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` if the policy number is already taken
    pub async fn insert(&self, rows: NewPolicyRows) -> Result<PolicyRecord, DatabaseError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        let NewPolicyRows {
            person,
            address,
            policy,
            premium,
            coverages,
        } = rows;

        sqlx::query(
            r#"
            INSERT INTO person (id, id_number, first_name, last_name, date_of_birth, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(person.id)
        .bind(&person.id_number)
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(person.date_of_birth)
        .bind(&person.email)
        .bind(&person.phone)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO address (id, person_id, street, city, state, zip_code, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(address.id)
        .bind(address.person_id)
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip_code)
        .bind(&address.country)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO policy (
                id, policy_number, type, status, created_at,
                effective_date, expiration_date, policyholder_id, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(policy.id)
        .bind(&policy.policy_number)
        .bind(policy.policy_type)
        .bind(policy.status)
        .bind(policy.created_at)
        .bind(policy.effective_date)
        .bind(policy.expiration_date)
        .bind(policy.policyholder_id)
        .bind(&policy.notes)
        .execute(&mut *tx)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::DuplicateEntry(_) => {
                DatabaseError::duplicate("Policy", "policy_number", &policy.policy_number)
            }
            other => other,
        })?;

        if let Some(premium) = premium {
            sqlx::query(
                r#"
                INSERT INTO premium (id, policy_id, amount, frequency, method, next_payment_date)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(premium.id)
            .bind(premium.policy_id)
            .bind(premium.amount)
            .bind(premium.frequency)
            .bind(premium.method)
            .bind(premium.next_payment_date)
            .execute(&mut *tx)
            .await?;
        }

        if !coverages.is_empty() {
            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO coverage \
                 (id, policy_id, position, type, description, coverage_limit, deductible, exclusions) ",
            );
            builder.push_values(coverages, |mut row, coverage| {
                row.push_bind(coverage.id)
                    .push_bind(coverage.policy_id)
                    .push_bind(coverage.position)
                    .push_bind(coverage.coverage_type)
                    .push_bind(coverage.description)
                    .push_bind(coverage.coverage_limit)
                    .push_bind(coverage.deductible)
                    .push_bind(coverage.exclusions);
            });
            builder.build().execute(&mut *tx).await?;
        }

        let stored = fetch_by_number(&mut tx, &policy.policy_number)
            .await?
            .ok_or_else(|| {
                DatabaseError::QueryFailed(format!(
                    "Policy '{}' not visible after insert",
                    policy.policy_number
                ))
            })?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        debug!(policy_number = %policy.policy_number, "Inserted policy");
        Ok(stored)
    }
}

async fn fetch_by_number(
    conn: &mut PgConnection,
    policy_number: &str,
) -> Result<Option<PolicyRecord>, DatabaseError> {
    let sql = format!("{SELECT_POLICY_RECORD} WHERE policy.policy_number = $1");
    let row = sqlx::query_as::<_, PolicyJoinedRow>(&sql)
        .bind(policy_number)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => Ok(attach_coverages(conn, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Loads the coverages of all `rows` in one query and builds records,
/// keeping the order of `rows`
async fn attach_coverages(
    conn: &mut PgConnection,
    rows: Vec<PolicyJoinedRow>,
) -> Result<Vec<PolicyRecord>, DatabaseError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let coverage_rows = sqlx::query_as::<_, CoverageRow>(
        r#"
        SELECT id, policy_id, position, type, description, coverage_limit, deductible, exclusions
        FROM coverage
        WHERE policy_id = ANY($1)
        ORDER BY policy_id, position
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut by_policy: HashMap<Uuid, Vec<CoverageRow>> = HashMap::new();
    for coverage in coverage_rows {
        by_policy.entry(coverage.policy_id).or_default().push(coverage);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let coverages = by_policy.remove(&row.id).unwrap_or_default();
            row.into_record(coverages)
        })
        .collect())
}
