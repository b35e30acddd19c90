//! Typed identifiers for Liaison entities.
//!
//! Every id is a prefixed UUID string (`ven-...`, `itm-...`), so ids are
//! collision-resistant without coordinating a counter at creation time.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $prefix:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh id with this type's prefix.
            pub fn new() -> Self {
                Self(format!("{}-{}", $prefix, uuid::Uuid::new_v4().simple()))
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier for a vendor (the external organization an agenda belongs to).
    VendorId,
    "ven"
);

string_id!(
    /// Identifier for a single work item record, unique within its entity type.
    ItemId,
    "itm"
);

string_id!(
    /// Reference to the person responsible for an item.
    OwnerId,
    "own"
);

string_id!(
    /// Reference to the project an item is associated with.
    ProjectRef,
    "prj"
);
