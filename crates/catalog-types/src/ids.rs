//! Newtype IDs for type-safe identifiers.
//!
//! Identifiers are assigned by the provider (backend or simulated store)
//! and are plain integers on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate integer-backed newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique integer identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from its raw value.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw integer value.
            pub const fn get(self) -> i64 {
                self.0
            }

            /// The identifier that follows this one.
            pub const fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);
