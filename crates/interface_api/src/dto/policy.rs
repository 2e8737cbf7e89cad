//! Policy DTOs
//!
//! Money (`premium.amount`, coverage `limit` and `deductible`) is written as
//! a decimal string such as `"420.50"`, keeping the stored scale exactly.
//! Requests accept the same strings or plain JSON numbers.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::temporal::start_of_day_utc;
use domain_policy::{
    Address, Coverage, PageRequest, PaymentFrequency, PaymentMethod, Person, Policy,
    PolicyFilter, PolicyPage, PolicyStatus, PolicyType, Premium,
};

use crate::error::ApiError;

/// Query string of `GET /policies`
///
/// Every filter is optional; dates accept RFC 3339 timestamps or plain
/// `YYYY-MM-DD` dates, read as midnight UTC.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyListParams {
    pub expiration_date_from: Option<String>,
    pub expiration_date_to: Option<String>,
    pub effective_date_from: Option<String>,
    pub effective_date_to: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub policyholder_id_number: Option<String>,
    pub policy_number: Option<String>,
    pub policy_status: Option<PolicyStatus>,
    pub policy_type: Option<PolicyType>,
}

impl PolicyListParams {
    /// Splits the parameters into a filter and a page request
    pub fn into_query(self) -> Result<(PolicyFilter, PageRequest), ApiError> {
        let defaults = PageRequest::default();
        let page = PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.page_size.unwrap_or(defaults.page_size),
        );

        let mut filter = PolicyFilter::new()
            .effective_between(
                parse_instant("effective-date-from", self.effective_date_from)?,
                parse_instant("effective-date-to", self.effective_date_to)?,
            )
            .expiring_between(
                parse_instant("expiration-date-from", self.expiration_date_from)?,
                parse_instant("expiration-date-to", self.expiration_date_to)?,
            );
        filter.policyholder_id_number = self.policyholder_id_number;
        filter.policy_number = self.policy_number;
        filter.policy_type = self.policy_type;
        filter.policy_status = self.policy_status;

        Ok((filter, page))
    }
}

fn parse_instant(
    param: &str,
    value: Option<String>,
) -> Result<Option<DateTime<Utc>>, ApiError> {
    let Some(value) = value else {
        return Ok(None);
    };
    if let Ok(instant) = DateTime::parse_from_rfc3339(&value) {
        return Ok(Some(instant.with_timezone(&Utc)));
    }
    if let Ok(date) = NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
        return Ok(Some(start_of_day_utc(date)));
    }
    Err(ApiError::BadRequest(format!(
        "{param}: '{value}' is neither an RFC 3339 timestamp nor a YYYY-MM-DD date"
    )))
}

/// Body of `POST /policies`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePolicyRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub policy_number: String,
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    #[serde(default)]
    pub status: PolicyStatus,
    pub effective_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    #[validate(nested)]
    pub policyholder: PersonRequest,
    #[serde(default)]
    #[validate(nested)]
    pub coverages: Vec<CoverageRequest>,
    #[serde(default)]
    #[validate(nested)]
    pub premium: Option<PremiumRequest>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PersonRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub id_number: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    #[validate(nested)]
    pub address: AddressRequest,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddressRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub street: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub zip_code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub country: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PremiumRequest {
    #[validate(custom(function = "positive"))]
    pub amount: Decimal,
    pub frequency: PaymentFrequency,
    pub method: PaymentMethod,
    #[serde(default)]
    pub next_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CoverageRequest {
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub coverage_type: String,
    pub description: String,
    #[serde(default)]
    #[validate(custom(function = "non_negative"))]
    pub limit: Option<Decimal>,
    #[validate(custom(function = "non_negative"))]
    pub deductible: Decimal,
    #[serde(default)]
    pub exclusions: Vec<String>,
}

fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("must_be_positive"));
    }
    Ok(())
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("must_not_be_negative"));
    }
    Ok(())
}

impl From<CreatePolicyRequest> for Policy {
    fn from(request: CreatePolicyRequest) -> Self {
        let holder = request.policyholder;
        let policyholder = Person {
            id_number: holder.id_number,
            first_name: holder.first_name,
            last_name: holder.last_name,
            date_of_birth: holder.date_of_birth,
            email: holder.email,
            phone: holder.phone,
            address: Address {
                street: holder.address.street,
                city: holder.address.city,
                state: holder.address.state,
                zip_code: holder.address.zip_code,
                country: holder.address.country,
            },
        };

        let mut policy = Policy::new(
            request.policy_number,
            request.policy_type,
            request.effective_date,
            request.expiration_date,
            policyholder,
        )
        .with_status(request.status);
        policy.notes = request.notes;
        policy.premium = request.premium.map(|p| Premium {
            amount: p.amount,
            frequency: p.frequency,
            method: p.method,
            next_payment_date: p.next_payment_date,
        });
        policy.coverages = request
            .coverages
            .into_iter()
            .map(|c| Coverage {
                coverage_type: c.coverage_type,
                description: c.description,
                limit: c.limit,
                deductible: c.deductible,
                exclusions: c.exclusions,
            })
            .collect();
        policy
    }
}

/// A policy as returned by the API, keyed by its number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyResponse {
    pub policy_number: String,
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    pub status: PolicyStatus,
    pub created_at: DateTime<Utc>,
    pub effective_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub policyholder: Person,
    pub coverages: Vec<Coverage>,
    pub premium: Option<Premium>,
    pub notes: Option<String>,
}

impl From<Policy> for PolicyResponse {
    fn from(policy: Policy) -> Self {
        Self {
            policy_number: policy.policy_number,
            policy_type: policy.policy_type,
            status: policy.status,
            created_at: policy.created_at,
            effective_date: policy.effective_date,
            expiration_date: policy.expiration_date,
            policyholder: policy.policyholder,
            coverages: policy.coverages,
            premium: policy.premium,
            notes: policy.notes,
        }
    }
}

/// Body of `GET /policies`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyListResponse {
    pub policies: Vec<PolicyResponse>,
    pub total_count: u64,
}

impl From<PolicyPage> for PolicyListResponse {
    fn from(page: PolicyPage) -> Self {
        Self {
            policies: page.policies.into_iter().map(PolicyResponse::from).collect(),
            total_count: page.total_count,
        }
    }
}
