//! Closed vocabularies used by policies and premiums
//!
//! Every enum serializes as its SCREAMING_SNAKE_CASE name on the wire and
//! deserializes from the same text only.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire name
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Line of business a policy belongs to
    PolicyType {
        Auto => "AUTO",
        Home => "HOME",
        Life => "LIFE",
        Health => "HEALTH",
        Travel => "TRAVEL",
        Business => "BUSINESS",
    }
}

wire_enum! {
    /// Caller-supplied lifecycle label; no transitions are enforced
    PolicyStatus {
        Active => "ACTIVE",
        Expired => "EXPIRED",
        Canceled => "CANCELED",
        Pending => "PENDING",
        Lapsed => "LAPSED",
    }
}

impl Default for PolicyStatus {
    fn default() -> Self {
        PolicyStatus::Pending
    }
}

wire_enum! {
    /// How often the premium is collected
    PaymentFrequency {
        Monthly => "MONTHLY",
        Quarterly => "QUARTERLY",
        SemiAnnual => "SEMI_ANNUAL",
        Annual => "ANNUAL",
        OneTime => "ONE_TIME",
    }
}

wire_enum! {
    /// How the premium is paid
    PaymentMethod {
        CreditCard => "CREDIT_CARD",
        BankTransfer => "BANK_TRANSFER",
        Check => "CHECK",
        Cash => "CASH",
        Paypal => "PAYPAL",
    }
}
