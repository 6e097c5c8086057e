//! Domain value objects: identifiers, entity kinds, parent references.
//!
//! # Design
//!
//! These are pure value types: `Copy` and compared by value, with no
//! identity of their own. Identifiers are assigned by the storage layer; the domain only
//! carries them around and compares them.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Identifiers ───────────────────────────────────────────────────────────────

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Storage-assigned identifier of a franchise.
    FranchiseId
);
entity_id!(
    /// Storage-assigned identifier of an office.
    OfficeId
);
entity_id!(
    /// Storage-assigned identifier of a product.
    ProductId
);

// ── EntityKind ────────────────────────────────────────────────────────────────

/// The three levels of the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Franchise,
    Office,
    Product,
}

impl EntityKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Franchise => "franchise",
            Self::Office => "office",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ParentRef ─────────────────────────────────────────────────────────────────

/// A reference to the immediate parent of a child entity.
///
/// Only franchises and offices can be parents. Adding a deeper level means
/// adding a variant here and one arm in the hierarchy checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentRef {
    Franchise(FranchiseId),
    Office(OfficeId),
}

impl ParentRef {
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Franchise(_) => EntityKind::Franchise,
            Self::Office(_) => EntityKind::Office,
        }
    }

    /// The raw identifier, for messages and logs.
    pub const fn raw_id(&self) -> i64 {
        match self {
            Self::Franchise(id) => id.get(),
            Self::Office(id) => id.get(),
        }
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.raw_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_by_raw_value() {
        assert!(ProductId::new(1) < ProductId::new(2));
        assert_eq!(OfficeId::from(7).get(), 7);
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&FranchiseId::new(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn parent_ref_reports_kind() {
        let parent = ParentRef::Office(OfficeId::new(3));
        assert_eq!(parent.kind(), EntityKind::Office);
        assert_eq!(parent.to_string(), "office 3");
    }
}
