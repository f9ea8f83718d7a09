use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RequestId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VolunteerId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BadgeId(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty { kind: &'static str },
    Whitespace { kind: &'static str, value: String },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { kind } => write!(f, "{kind} id must not be empty"),
            Self::Whitespace { kind, value } => {
                write!(f, "{kind} id has surrounding whitespace: {value:?}")
            }
        }
    }
}

impl std::error::Error for IdError {}

fn validate_opaque(value: &str, kind: &'static str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty { kind });
    }
    if value.trim() != value {
        return Err(IdError::Whitespace {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

macro_rules! id_type {
    ($name:ident, $kind:expr, $prefix:expr) => {
        impl $name {
            pub const KIND: &'static str = $kind;
            pub const PREFIX: &'static str = $prefix;

            pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
                let value = value.into();
                validate_opaque(&value, Self::KIND)?;
                Ok(Self(value))
            }

            /// A fresh `<prefix><ulid>` id.
            pub fn generate() -> Self {
                Self(format!("{}{}", Self::PREFIX, Ulid::new()))
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

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = String::deserialize(deserializer)?;
                Self::new(value).map_err(serde::de::Error::custom)
            }
        }
    };
}

id_type!(RequestId, "request", "req_");
id_type!(VolunteerId, "volunteer", "vol_");
id_type!(BadgeId, "badge", "badge_");

impl RequestId {
    /// The last three characters, as shown in "Request #123" notifications.
    pub fn short(&self) -> &str {
        let start = self
            .0
            .char_indices()
            .rev()
            .nth(2)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        &self.0[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_ids_accept_any_non_blank_text() {
        assert_eq!(RequestId::new("1").unwrap().as_str(), "1");
        assert_eq!(
            "req-ab12".parse::<RequestId>().unwrap().to_string(),
            "req-ab12"
        );
    }

    #[test]
    fn rejects_empty_and_padded_ids() {
        assert_eq!(
            RequestId::new(""),
            Err(IdError::Empty { kind: "request" })
        );
        assert!(matches!(
            VolunteerId::new(" v1"),
            Err(IdError::Whitespace { .. })
        ));
    }

    #[test]
    fn generated_ids_carry_prefix() {
        let id = VolunteerId::generate();
        assert!(id.as_str().starts_with(VolunteerId::PREFIX));
        assert_eq!(id.as_str().len(), VolunteerId::PREFIX.len() + 26);
        assert_ne!(RequestId::generate(), RequestId::generate());
    }

    #[test]
    fn short_takes_last_three_chars() {
        assert_eq!(RequestId::new("req_1042").unwrap().short(), "042");
        assert_eq!(RequestId::new("7").unwrap().short(), "7");
        assert_eq!(RequestId::new("aéбц").unwrap().short(), "éбц");
    }

    #[test]
    fn deserialize_validates() {
        let id: RequestId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(id.as_str(), "42");
        assert!(serde_json::from_str::<BadgeId>("\"\"").is_err());
    }
}
