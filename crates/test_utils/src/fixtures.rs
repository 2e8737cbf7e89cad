//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for policy records. Everything here is
//! deterministic except [`PersonFixtures::random`], which uses `fake`.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fake::faker::address::en::{CityName, StreetName, ZipCode};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rust_decimal_macros::dec;

use domain_policy::{Address, Coverage, PaymentFrequency, PaymentMethod, Person, Premium};

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard policy start date (Jan 1, 2024)
    pub fn policy_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Standard policy end date (Jan 1, 2025)
    pub fn policy_end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    /// Mid-year timestamp for containment tests
    pub fn mid_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    /// Standard date of birth
    pub fn date_of_birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 4, 12).unwrap()
    }
}

/// Fixture for people and their addresses
pub struct PersonFixtures;

impl PersonFixtures {
    /// A fixed address in Lisbon
    pub fn address() -> Address {
        Address::new("Rua Augusta 100", "Lisboa", "1100-053", "PT")
    }

    /// A fixed policyholder with the given national id
    pub fn holder(id_number: impl Into<String>) -> Person {
        Person {
            id_number: id_number.into(),
            first_name: "Ana".to_string(),
            last_name: "Costa".to_string(),
            date_of_birth: TemporalFixtures::date_of_birth(),
            email: "ana.costa@example.com".to_string(),
            phone: "+351 910 000 000".to_string(),
            address: Self::address(),
        }
    }

    /// A policyholder with generated names and contact details
    pub fn random(id_number: impl Into<String>) -> Person {
        Person {
            id_number: id_number.into(),
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            date_of_birth: TemporalFixtures::date_of_birth(),
            email: SafeEmail().fake(),
            phone: PhoneNumber().fake(),
            address: Address::new(
                StreetName().fake::<String>(),
                CityName().fake::<String>(),
                ZipCode().fake::<String>(),
                "US",
            ),
        }
    }
}

/// Fixture for premiums and coverages
pub struct TermsFixtures;

impl TermsFixtures {
    /// Monthly card premium
    pub fn monthly_premium() -> Premium {
        Premium::new(dec!(42.50), PaymentFrequency::Monthly, PaymentMethod::CreditCard)
    }

    /// Collision cover with a limit and one exclusion
    pub fn collision() -> Coverage {
        Coverage::new("COLLISION", "Damage from collisions", dec!(250.00))
            .with_limit(dec!(50000.00))
            .exclude("racing")
    }

    /// Liability cover without a limit
    pub fn liability() -> Coverage {
        Coverage::new("LIABILITY", "Third-party liability", dec!(0))
    }
}
