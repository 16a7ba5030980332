//! Component addresses
//!
//! An [`Address`] is a `(kind, name)` pair. The name is usually a plain
//! string but may be one of two reserved tokens: [`ALL`], which stands for
//! every name under a kind, and [`MAIN`], which stands for the single main
//! object of a kind (for example the application router).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{ALL_NAME_DISPLAY, MAIN_NAME_DISPLAY};

/// Name half of an [`Address`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Name {
    /// A regular, string-named entry
    Named(String),
    /// The main object of a kind
    Main,
    /// Every name under a kind
    All,
}

/// Kind-wide sentinel name
pub const ALL: Name = Name::All;

/// Main-object token name
pub const MAIN: Name = Name::Main;

impl Name {
    /// Returns the string for named entries, `None` for tokens
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Main | Self::All => None,
        }
    }

    /// Whether this is the kind-wide sentinel
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Main => f.write_str(MAIN_NAME_DISPLAY),
            Self::All => f.write_str(ALL_NAME_DISPLAY),
        }
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<&String> for Name {
    fn from(name: &String) -> Self {
        Self::Named(name.clone())
    }
}

impl From<&Name> for Name {
    fn from(name: &Name) -> Self {
        name.clone()
    }
}

/// A `(kind, name)` pair identifying a registrable entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address {
    kind: String,
    name: Name,
}

impl Address {
    /// Create an address from a kind and a name
    pub fn new<K: Into<String>, N: Into<Name>>(kind: K, name: N) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// The kind-wide address `(kind, ALL)`
    pub fn all<K: Into<String>>(kind: K) -> Self {
        Self::new(kind, Name::All)
    }

    /// The main-object address `(kind, MAIN)`
    pub fn main<K: Into<String>>(kind: K) -> Self {
        Self::new(kind, Name::Main)
    }

    /// Kind namespace
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Name within the kind
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Whether this is a kind-wide address
    pub fn is_kind_wide(&self) -> bool {
        self.name.is_all()
    }

    /// The kind-wide address for this address' kind
    pub fn kind_wide(&self) -> Self {
        Self::all(self.kind.clone())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

impl<K: Into<String>, N: Into<Name>> From<(K, N)> for Address {
    fn from((kind, name): (K, N)) -> Self {
        Self::new(kind, name)
    }
}

impl From<&Address> for Address {
    fn from(address: &Address) -> Self {
        address.clone()
    }
}
