//! A module for vertex and edge identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An identifier for a vertex or an edge, either an integer or a string.
///
/// Identifiers compare by value. The ordering places every integer before every string, which
/// keeps sorted views (such as the adjacency matrix index) stable across runs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Str(String),
}

impl Id {
    /// Returns the integer value if this is an integer identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::id::Id;
    ///
    /// assert_eq!(Id::from(3).as_int(), Some(3));
    /// assert_eq!(Id::from("a").as_int(), None);
    /// ```
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Id::Int(value) => Some(*value),
            Id::Str(_) => None,
        }
    }

    /// Returns the string value if this is a string identifier.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Id::Int(_) => None,
            Id::Str(value) => Some(value),
        }
    }
}

//
// Trait implementations
//

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(value) => write!(f, "{value}"),
            Id::Str(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Int(value)
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Id::Int(value.into())
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Id::Int(value.into())
    }
}

impl From<usize> for Id {
    fn from(value: usize) -> Self {
        // Identifiers beyond i64::MAX are not representable, saturate rather than wrap.
        Id::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Str(value.to_owned())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::Str(value)
    }
}

impl From<&Id> for Id {
    fn from(value: &Id) -> Self {
        value.clone()
    }
}
