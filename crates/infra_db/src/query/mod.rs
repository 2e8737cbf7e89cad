//! Query construction for policy listings
//!
//! Policy reads share one joined SELECT. Filters are appended with
//! [`push_predicate`] and paged listings go through [`fetch_page`], which
//! runs the count and the page under the same predicate.

pub mod pagination;
pub mod predicate;

pub use pagination::{fetch_page, RowPage};
pub use predicate::push_predicate;

/// Joined SELECT over a policy and its one-to-one relations
///
/// Relations are outer-joined so that a missing related row surfaces as a
/// mapping error instead of silently dropping the policy.
pub const SELECT_POLICY_RECORD: &str = r#"
    SELECT
        policy.id,
        policy.policy_number,
        policy.type AS policy_type,
        policy.status,
        policy.created_at,
        policy.effective_date,
        policy.expiration_date,
        policy.policyholder_id,
        policy.notes,
        person.id AS person_id,
        person.id_number AS person_id_number,
        person.first_name AS person_first_name,
        person.last_name AS person_last_name,
        person.date_of_birth AS person_date_of_birth,
        person.email AS person_email,
        person.phone AS person_phone,
        address.id AS address_id,
        address.street AS address_street,
        address.city AS address_city,
        address.state AS address_state,
        address.zip_code AS address_zip_code,
        address.country AS address_country,
        premium.id AS premium_id,
        premium.amount AS premium_amount,
        premium.frequency AS premium_frequency,
        premium.method AS premium_method,
        premium.next_payment_date AS premium_next_payment_date
    FROM policy
    LEFT JOIN person ON person.id = policy.policyholder_id
    LEFT JOIN address ON address.person_id = person.id
    LEFT JOIN premium ON premium.policy_id = policy.id
"#;

/// Count over the same relation the listing pages through
pub const COUNT_POLICIES: &str = "SELECT COUNT(*)::BIGINT FROM policy";

/// Newest first, with the id as a tie-break so paging is deterministic
pub const ORDER_NEWEST_FIRST: &str = " ORDER BY policy.created_at DESC, policy.id DESC";
