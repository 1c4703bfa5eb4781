//! Typed identifiers for library records.
//!
//! Every record carries two identities: a store-assigned sequential
//! [`RecordKey`] that never leaves the persistence boundary, and an opaque
//! UUID identifier that is safe to expose to clients.

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sequential primary key assigned by the store on first insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey(NonZeroU64);

impl RecordKey {
    /// Wrap a raw key, returning `None` for zero.
    #[must_use]
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// First key handed out by a fresh store.
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    /// The raw key value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// The key following this one.
    #[must_use]
    pub fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

define_entity_id! {
    /// Opaque public identifier of a book.
    BookId
}

define_entity_id! {
    /// Opaque public identifier of a client.
    ClientId
}

define_entity_id! {
    /// Opaque public identifier of an employee.
    EmployeeId
}

define_entity_id! {
    /// Opaque public identifier of a category.
    CategoryId
}

define_entity_id! {
    /// Opaque public identifier of a loan.
    LoanId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn record_key_rejects_zero() {
        assert!(RecordKey::new(0).is_none());
        assert_eq!(RecordKey::new(7).map(RecordKey::get), Some(7));
    }

    #[rstest]
    fn record_keys_count_up_from_one() {
        assert_eq!(RecordKey::FIRST.get(), 1);
        assert_eq!(RecordKey::FIRST.successor().get(), 2);
    }

    #[rstest]
    fn identifiers_parse_and_display_as_uuid() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id: BookId = raw.parse().expect("valid uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    fn identifiers_serialise_transparently() {
        let id = LoanId::random();
        let value = serde_json::to_value(id).expect("serialise id");
        assert_eq!(value, serde_json::Value::String(id.to_string()));
    }
}
