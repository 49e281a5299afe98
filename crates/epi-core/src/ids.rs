//! Strongly typed, zero-cost identifier wrappers.
//!
//! Uuids are assigned by the host when it synthesizes the population; the
//! framework never generates them.  All ids are `Copy + Ord + Hash` so they
//! can be used as map keys and sorted collection elements without ceremony.
//! The inner integer is `pub` for direct construction in host code and tests.

use std::fmt;

/// Generate a typed uuid wrapper around a `u64`.
macro_rules! typed_uuid {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u64);

        impl $name {
            /// Sentinel meaning "no valid uuid" — equivalent to `u64::MAX`.
            pub const INVALID: $name = $name(u64::MAX);

            /// `true` unless this is the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so unassigned uuids are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<u64> for $name {
            #[inline(always)]
            fn from(raw: u64) -> $name {
                $name(raw)
            }
        }
    };
}

typed_uuid! {
    /// Identity of a simulated individual.
    pub struct AgentUuid;
}

typed_uuid! {
    /// Identity of a place agents visit.
    pub struct LocationUuid;
}
