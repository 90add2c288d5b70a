//! Status helper enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data in the
//! corresponding lookup table (`lock_statuses`, `transaction_types`).

use serde::{Serialize, Serializer};

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Look up a variant by its database status ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Name as stored in the lookup table.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_status_enum! {
    /// Lock lifecycle status.
    LockStatus {
        /// Owned and displayed on the bridge.
        Active = 1 => "Active",
        /// Listed by its owner on the marketplace.
        ForSale = 2 => "For_Sale",
        /// Golden number held by the operator.
        ReservedAdmin = 3 => "Reserved_Admin",
        /// Released by its owner; no owner.
        BrokenHeart = 4 => "Broken_Heart",
        Available = 5 => "Available",
    }
}

define_status_enum! {
    /// Kind of value movement recorded in the transaction log.
    TransactionType {
        Purchase = 1 => "purchase",
        Resale = 2 => "resale",
        Boost = 3 => "boost",
    }
}
