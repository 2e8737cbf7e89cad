//! Storage row types
//!
//! One struct per table plus the joined row the policy queries return.
//! Enum columns use the PostgreSQL enum types created by the migrations.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Policy type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "policy_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyType {
    Auto,
    Home,
    Life,
    Health,
    Travel,
    Business,
}

/// Policy status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "policy_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    Active,
    Expired,
    Canceled,
    Pending,
    Lapsed,
}

/// Payment frequency enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_frequency", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    OneTime,
}

/// Payment method enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
    Check,
    Cash,
    Paypal,
}

/// Row of the `person` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PersonRow {
    pub id: Uuid,
    pub id_number: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub phone: String,
}

/// Row of the `address` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AddressRow {
    pub id: Uuid,
    pub person_id: Uuid,
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub zip_code: String,
    pub country: String,
}

/// Row of the `policy` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PolicyRow {
    pub id: Uuid,
    pub policy_number: String,
    #[sqlx(rename = "type")]
    pub policy_type: PolicyType,
    pub status: PolicyStatus,
    pub created_at: DateTime<Utc>,
    pub effective_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub policyholder_id: Uuid,
    pub notes: Option<String>,
}

/// Row of the `premium` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PremiumRow {
    pub id: Uuid,
    pub policy_id: Uuid,
    pub amount: Decimal,
    pub frequency: PaymentFrequency,
    pub method: PaymentMethod,
    pub next_payment_date: Option<NaiveDate>,
}

/// Row of the `coverage` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CoverageRow {
    pub id: Uuid,
    pub policy_id: Uuid,
    pub position: i32,
    #[sqlx(rename = "type")]
    pub coverage_type: String,
    pub description: String,
    pub coverage_limit: Option<Decimal>,
    pub deductible: Decimal,
    pub exclusions: Vec<String>,
}

/// A policy row with its related rows, as read from the store
///
/// Related rows are optional because they are outer-joined; the mapper
/// decides whether their absence is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRecord {
    pub policy: PolicyRow,
    pub policyholder: Option<PersonRow>,
    pub address: Option<AddressRow>,
    pub premium: Option<PremiumRow>,
    pub coverages: Vec<CoverageRow>,
}

/// Every row written when a policy is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPolicyRows {
    pub person: PersonRow,
    pub address: AddressRow,
    pub policy: PolicyRow,
    pub premium: Option<PremiumRow>,
    pub coverages: Vec<CoverageRow>,
}

/// Flat row produced by [`crate::query::SELECT_POLICY_RECORD`]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PolicyJoinedRow {
    pub id: Uuid,
    pub policy_number: String,
    pub policy_type: PolicyType,
    pub status: PolicyStatus,
    pub created_at: DateTime<Utc>,
    pub effective_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub policyholder_id: Uuid,
    pub notes: Option<String>,

    pub person_id: Option<Uuid>,
    pub person_id_number: Option<String>,
    pub person_first_name: Option<String>,
    pub person_last_name: Option<String>,
    pub person_date_of_birth: Option<NaiveDate>,
    pub person_email: Option<String>,
    pub person_phone: Option<String>,

    pub address_id: Option<Uuid>,
    pub address_street: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub address_zip_code: Option<String>,
    pub address_country: Option<String>,

    pub premium_id: Option<Uuid>,
    pub premium_amount: Option<Decimal>,
    pub premium_frequency: Option<PaymentFrequency>,
    pub premium_method: Option<PaymentMethod>,
    pub premium_next_payment_date: Option<NaiveDate>,
}

impl PolicyJoinedRow {
    /// Splits the flat row and attaches the policy's coverages
    pub fn into_record(mut self, coverages: Vec<CoverageRow>) -> PolicyRecord {
        let policyholder = self.take_person();
        let address = self.take_address();
        let premium = self.take_premium();
        PolicyRecord {
            policy: PolicyRow {
                id: self.id,
                policy_number: self.policy_number,
                policy_type: self.policy_type,
                status: self.status,
                created_at: self.created_at,
                effective_date: self.effective_date,
                expiration_date: self.expiration_date,
                policyholder_id: self.policyholder_id,
                notes: self.notes,
            },
            policyholder,
            address,
            premium,
            coverages,
        }
    }

    fn take_person(&mut self) -> Option<PersonRow> {
        Some(PersonRow {
            id: self.person_id.take()?,
            id_number: self.person_id_number.take()?,
            first_name: self.person_first_name.take()?,
            last_name: self.person_last_name.take()?,
            date_of_birth: self.person_date_of_birth.take()?,
            email: self.person_email.take()?,
            phone: self.person_phone.take()?,
        })
    }

    fn take_address(&mut self) -> Option<AddressRow> {
        Some(AddressRow {
            id: self.address_id.take()?,
            person_id: self.policyholder_id,
            street: self.address_street.take()?,
            city: self.address_city.take()?,
            state: self.address_state.take(),
            zip_code: self.address_zip_code.take()?,
            country: self.address_country.take()?,
        })
    }

    fn take_premium(&mut self) -> Option<PremiumRow> {
        Some(PremiumRow {
            id: self.premium_id.take()?,
            policy_id: self.id,
            amount: self.premium_amount.take()?,
            frequency: self.premium_frequency.take()?,
            method: self.premium_method.take()?,
            next_payment_date: self.premium_next_payment_date.take(),
        })
    }
}
