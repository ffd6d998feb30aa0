//! Integer identifiers handed out by the host repository.
//!
//! The host numbers elements, packages and connectors in separate tables, so
//! each gets its own newtype to keep them from being mixed up.

use std::fmt;
use std::str::FromStr;

macro_rules! host_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub i32);

        impl $name {
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// The raw integer value, as stored by the host.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

host_id!(
    /// Identifier of an element (`t_object.Object_ID`).
    ElementId
);

host_id!(
    /// Identifier of a package (`t_package.Package_ID`).
    PackageId
);

host_id!(
    /// Identifier of a connector (`t_connector.Connector_ID`).
    ConnectorId
);
