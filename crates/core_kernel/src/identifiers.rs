//! Row keys for stored entities
//!
//! Each table gets its own key type so a person key cannot be bound where a
//! policy key belongs. Keys are time-ordered (UUID v7); they never appear on
//! the HTTP surface, which addresses policies by policy number.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! row_key {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// A fresh key; later keys sort after earlier ones
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(key: $name) -> Uuid {
                key.0
            }
        }
    };
}

row_key!(
    /// Key of a `policy` row
    PolicyId
);
row_key!(
    /// Key of a `person` row
    PersonId
);
row_key!(AddressId);
row_key!(PremiumId);
row_key!(CoverageId);
