//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony. Graph-internal ids (`NodeId`,
//! `EdgeId`) wrap a `u32` and index directly into SoA `Vec`s; feature ids
//! (`PoleId`, `LineId`, ...) wrap the stable `String` id the GIS source
//! assigns, since those must round-trip back to the caller in a
//! `RouteResult`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
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

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a road-graph node (CSR-indexed).
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed road-graph edge (CSR-indexed).
    pub struct EdgeId(u32);
}

// ── Stable feature ids ──────────────────────────────────────────────────────

/// Generate a typed ID wrapper around the GIS source's stable string id.
///
/// Unlike `NodeId`/`EdgeId`, these do not index into any array — they are
/// opaque identities that must be echoed back to the caller in a
/// `RouteResult` (e.g. `start_pole_id`), so they carry the source's own
/// string rather than a locally assigned integer.
macro_rules! feature_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

feature_id! {
    /// Stable identity of an existing utility pole.
    pub struct PoleId;
}

feature_id! {
    /// Stable identity of an existing line (wire span between two points).
    pub struct LineId;
}

feature_id! {
    /// Stable identity of a transformer feature.
    pub struct TransformerId;
}

feature_id! {
    /// Stable identity of a road feature.
    pub struct RoadId;
}

feature_id! {
    /// Stable identity of a building polygon.
    pub struct BuildingId;
}

feature_id! {
    /// Stable identity of a railway feature.
    pub struct RailwayId;
}

feature_id! {
    /// Stable identity of a river feature.
    pub struct RiverId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn node_id_invalid_sentinel() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn feature_id_display_and_eq() {
        let a = PoleId::from("P-001");
        let b = PoleId::new("P-001".to_string());
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "P-001");
        assert_eq!(a.as_str(), "P-001");
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(PoleId::from("A") < PoleId::from("B"));
    }
}
