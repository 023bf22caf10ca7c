use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Role of a wallet on a case.
///
/// One tagged enum shared by the signup flow and the participant roster.
/// The wire format is the capitalized form, but parsing is tolerant of the
/// casing drift the backend has accumulated ("lawyer", "LAWYER", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParticipantRole {
    #[default]
    Civilian,
    Lawyer,
    Judge,
    Police,
    Admin,
}

impl ParticipantRole {
    /// Parse from an API payload. Unknown values default to Civilian.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "lawyer" => ParticipantRole::Lawyer,
            "judge" => ParticipantRole::Judge,
            "police" => ParticipantRole::Police,
            "admin" => ParticipantRole::Admin,
            _ => ParticipantRole::Civilian,
        }
    }

    /// Canonical capitalized form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Civilian => "Civilian",
            ParticipantRole::Lawyer => "Lawyer",
            ParticipantRole::Judge => "Judge",
            ParticipantRole::Police => "Police",
            ParticipantRole::Admin => "Admin",
        }
    }

    pub const ALL: &'static [ParticipantRole] = &[
        ParticipantRole::Civilian,
        ParticipantRole::Lawyer,
        ParticipantRole::Judge,
        ParticipantRole::Police,
        ParticipantRole::Admin,
    ];
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ParticipantRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParticipantRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_str_or_default(&raw))
    }
}
