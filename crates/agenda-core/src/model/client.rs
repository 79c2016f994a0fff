use std::fmt;

use serde::{Deserialize, Serialize};

/// ## Summary
/// Identity of the client a session is booked for.
///
/// Registered clients are referenced by id. Older bookings only carry the
/// client's name as free text, and are matched on that exact string.
/// Two references only denote the same client when they are the same variant
/// with the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ClientRef {
    ById(uuid::Uuid),
    ByName(String),
}

impl ClientRef {
    /// ## Summary
    /// Builds the identity from an optional registry id and a display name.
    /// The id wins when present; a blank name yields no identity at all.
    #[must_use]
    pub fn resolve(id: Option<uuid::Uuid>, name: &str) -> Option<Self> {
        if let Some(id) = id {
            return Some(Self::ById(id));
        }
        let name = name.trim();
        (!name.is_empty()).then(|| Self::ByName(name.to_string()))
    }

    #[must_use]
    pub fn same_client(&self, other: &Self) -> bool {
        self == other
    }

    #[must_use]
    pub const fn id(&self) -> Option<uuid::Uuid> {
        match self {
            Self::ById(id) => Some(*id),
            Self::ByName(_) => None,
        }
    }
}

impl fmt::Display for ClientRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(id) => write!(f, "id:{id}"),
            Self::ByName(name) => write!(f, "name:{name}"),
        }
    }
}

/// Contact details copied onto a session when it is booked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// A client as known to the client registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}
