//! Conversions between domain records and storage rows
//!
//! Mapping is lossless in both directions and performs no validation. Enum
//! conversions are exhaustive matches so a new variant on either side fails
//! to compile until it is mapped.

use core_kernel::{AddressId, CoverageId, PersonId, PolicyId, PremiumId};
use domain_policy::{
    Address, Coverage, PaymentFrequency, PaymentMethod, Person, Policy, PolicyStatus,
    PolicyType, Premium,
};
use uuid::Uuid;

use crate::error::MappingError;
use crate::rows::{
    self, AddressRow, CoverageRow, NewPolicyRows, PersonRow, PolicyRecord, PolicyRow,
    PremiumRow,
};

/// Rebuilds a domain policy from its stored rows
///
/// # Errors
///
/// Returns a `MappingError` when the policyholder or its address is missing
pub fn record_to_policy(record: PolicyRecord) -> Result<Policy, MappingError> {
    let PolicyRecord {
        policy,
        policyholder,
        address,
        premium,
        mut coverages,
    } = record;

    let person = policyholder.ok_or_else(|| MappingError::MissingPolicyholder {
        policy_number: policy.policy_number.clone(),
    })?;
    let address = address.ok_or(MappingError::MissingAddress {
        person_id: person.id,
    })?;

    coverages.sort_by_key(|c| c.position);

    Ok(Policy {
        id: PolicyId::from(policy.id),
        policy_number: policy.policy_number,
        policy_type: db_to_domain_policy_type(policy.policy_type),
        status: db_to_domain_policy_status(policy.status),
        created_at: policy.created_at,
        effective_date: policy.effective_date,
        expiration_date: policy.expiration_date,
        policyholder: row_to_person(person, address),
        coverages: coverages.into_iter().map(row_to_coverage).collect(),
        premium: premium.map(row_to_premium),
        notes: policy.notes,
    })
}

/// Maps every record, failing on the first one that cannot be mapped
pub fn records_to_policies(records: Vec<PolicyRecord>) -> Result<Vec<Policy>, MappingError> {
    records.into_iter().map(record_to_policy).collect()
}

/// Produces the rows that store a new policy
///
/// The policy keeps its own id; the policyholder, address, premium and
/// coverages get fresh storage ids.
pub fn policy_to_rows(policy: &Policy) -> NewPolicyRows {
    let person_id: Uuid = PersonId::new_v7().into();
    let policy_id: Uuid = policy.id.into();

    let holder = &policy.policyholder;
    let person = PersonRow {
        id: person_id,
        id_number: holder.id_number.clone(),
        first_name: holder.first_name.clone(),
        last_name: holder.last_name.clone(),
        date_of_birth: holder.date_of_birth,
        email: holder.email.clone(),
        phone: holder.phone.clone(),
    };

    let address = AddressRow {
        id: AddressId::new_v7().into(),
        person_id,
        street: holder.address.street.clone(),
        city: holder.address.city.clone(),
        state: holder.address.state.clone(),
        zip_code: holder.address.zip_code.clone(),
        country: holder.address.country.clone(),
    };

    let policy_row = PolicyRow {
        id: policy_id,
        policy_number: policy.policy_number.clone(),
        policy_type: domain_to_db_policy_type(policy.policy_type),
        status: domain_to_db_policy_status(policy.status),
        created_at: policy.created_at,
        effective_date: policy.effective_date,
        expiration_date: policy.expiration_date,
        policyholder_id: person_id,
        notes: policy.notes.clone(),
    };

    let premium = policy.premium.as_ref().map(|premium| PremiumRow {
        id: PremiumId::new_v7().into(),
        policy_id,
        amount: premium.amount,
        frequency: domain_to_db_frequency(premium.frequency),
        method: domain_to_db_method(premium.method),
        next_payment_date: premium.next_payment_date,
    });

    let coverages = policy
        .coverages
        .iter()
        .zip(0i32..)
        .map(|(coverage, position)| CoverageRow {
            id: CoverageId::new_v7().into(),
            policy_id,
            position,
            coverage_type: coverage.coverage_type.clone(),
            description: coverage.description.clone(),
            coverage_limit: coverage.limit,
            deductible: coverage.deductible,
            exclusions: coverage.exclusions.clone(),
        })
        .collect();

    NewPolicyRows {
        person,
        address,
        policy: policy_row,
        premium,
        coverages,
    }
}

fn row_to_person(person: PersonRow, address: AddressRow) -> Person {
    Person {
        id_number: person.id_number,
        first_name: person.first_name,
        last_name: person.last_name,
        date_of_birth: person.date_of_birth,
        email: person.email,
        phone: person.phone,
        address: Address {
            street: address.street,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            country: address.country,
        },
    }
}

fn row_to_premium(row: PremiumRow) -> Premium {
    Premium {
        amount: row.amount,
        frequency: db_to_domain_frequency(row.frequency),
        method: db_to_domain_method(row.method),
        next_payment_date: row.next_payment_date,
    }
}

fn row_to_coverage(row: CoverageRow) -> Coverage {
    Coverage {
        coverage_type: row.coverage_type,
        description: row.description,
        limit: row.coverage_limit,
        deductible: row.deductible,
        exclusions: row.exclusions,
    }
}

// ============================================================================
// Enum conversions
// ============================================================================

pub fn domain_to_db_policy_type(t: PolicyType) -> rows::PolicyType {
    match t {
        PolicyType::Auto => rows::PolicyType::Auto,
        PolicyType::Home => rows::PolicyType::Home,
        PolicyType::Life => rows::PolicyType::Life,
        PolicyType::Health => rows::PolicyType::Health,
        PolicyType::Travel => rows::PolicyType::Travel,
        PolicyType::Business => rows::PolicyType::Business,
    }
}

pub fn db_to_domain_policy_type(t: rows::PolicyType) -> PolicyType {
    match t {
        rows::PolicyType::Auto => PolicyType::Auto,
        rows::PolicyType::Home => PolicyType::Home,
        rows::PolicyType::Life => PolicyType::Life,
        rows::PolicyType::Health => PolicyType::Health,
        rows::PolicyType::Travel => PolicyType::Travel,
        rows::PolicyType::Business => PolicyType::Business,
    }
}

pub fn domain_to_db_policy_status(s: PolicyStatus) -> rows::PolicyStatus {
    match s {
        PolicyStatus::Active => rows::PolicyStatus::Active,
        PolicyStatus::Expired => rows::PolicyStatus::Expired,
        PolicyStatus::Canceled => rows::PolicyStatus::Canceled,
        PolicyStatus::Pending => rows::PolicyStatus::Pending,
        PolicyStatus::Lapsed => rows::PolicyStatus::Lapsed,
    }
}

pub fn db_to_domain_policy_status(s: rows::PolicyStatus) -> PolicyStatus {
    match s {
        rows::PolicyStatus::Active => PolicyStatus::Active,
        rows::PolicyStatus::Expired => PolicyStatus::Expired,
        rows::PolicyStatus::Canceled => PolicyStatus::Canceled,
        rows::PolicyStatus::Pending => PolicyStatus::Pending,
        rows::PolicyStatus::Lapsed => PolicyStatus::Lapsed,
    }
}

fn domain_to_db_frequency(f: PaymentFrequency) -> rows::PaymentFrequency {
    match f {
        PaymentFrequency::Monthly => rows::PaymentFrequency::Monthly,
        PaymentFrequency::Quarterly => rows::PaymentFrequency::Quarterly,
        PaymentFrequency::SemiAnnual => rows::PaymentFrequency::SemiAnnual,
        PaymentFrequency::Annual => rows::PaymentFrequency::Annual,
        PaymentFrequency::OneTime => rows::PaymentFrequency::OneTime,
    }
}

fn db_to_domain_frequency(f: rows::PaymentFrequency) -> PaymentFrequency {
    match f {
        rows::PaymentFrequency::Monthly => PaymentFrequency::Monthly,
        rows::PaymentFrequency::Quarterly => PaymentFrequency::Quarterly,
        rows::PaymentFrequency::SemiAnnual => PaymentFrequency::SemiAnnual,
        rows::PaymentFrequency::Annual => PaymentFrequency::Annual,
        rows::PaymentFrequency::OneTime => PaymentFrequency::OneTime,
    }
}

fn domain_to_db_method(m: PaymentMethod) -> rows::PaymentMethod {
    match m {
        PaymentMethod::CreditCard => rows::PaymentMethod::CreditCard,
        PaymentMethod::BankTransfer => rows::PaymentMethod::BankTransfer,
        PaymentMethod::Check => rows::PaymentMethod::Check,
        PaymentMethod::Cash => rows::PaymentMethod::Cash,
        PaymentMethod::Paypal => rows::PaymentMethod::Paypal,
    }
}

fn db_to_domain_method(m: rows::PaymentMethod) -> PaymentMethod {
    match m {
        rows::PaymentMethod::CreditCard => PaymentMethod::CreditCard,
        rows::PaymentMethod::BankTransfer => PaymentMethod::BankTransfer,
        rows::PaymentMethod::Check => PaymentMethod::Check,
        rows::PaymentMethod::Cash => PaymentMethod::Cash,
        rows::PaymentMethod::Paypal => PaymentMethod::Paypal,
    }
}
