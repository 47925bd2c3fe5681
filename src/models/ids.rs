//! Strongly-typed ID wrappers for all entity types
//!
//! Income streams and expenses are keyed by the integer ids the household
//! backend assigns; locally saved scenarios get their own UUIDs. Newtypes keep
//! the three from being mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Error returned when an id string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError(pub String);

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid id: {}", self.0)
    }
}

impl std::error::Error for IdParseError {}

/// Macro to generate newtypes over the backend's integer keys
macro_rules! define_backend_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the backend's raw key
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let digits = trimmed.strip_prefix($display_prefix).unwrap_or(trimmed);
                digits
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| IdParseError(s.to_string()))
            }
        }
    };
}

define_backend_id!(IncomeStreamId, "inc-");
define_backend_id!(ExpenseId, "exp-");

/// Identifier of a locally saved what-if scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(Uuid);

impl ScenarioId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short form shown in listings; accepted back by `matches_short`
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }

    /// Check whether a user-typed reference (full UUID or short form) names this id
    pub fn matches_short(&self, reference: &str) -> bool {
        let reference = reference.trim();
        let reference = reference.strip_prefix("scn-").unwrap_or(reference);
        if let Ok(uuid) = Uuid::parse_str(reference) {
            return uuid == self.0;
        }
        reference.len() >= 4 && self.0.simple().to_string().starts_with(&reference.to_lowercase())
    }
}

impl Default for ScenarioId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scn-{}", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_id_display() {
        assert_eq!(IncomeStreamId::new(12).to_string(), "inc-12");
        assert_eq!(ExpenseId::new(3).to_string(), "exp-3");
    }

    #[test]
    fn test_backend_id_parse_with_and_without_prefix() {
        assert_eq!("7".parse::<IncomeStreamId>().unwrap(), IncomeStreamId::new(7));
        assert_eq!("inc-7".parse::<IncomeStreamId>().unwrap(), IncomeStreamId::new(7));
        assert!("salary".parse::<IncomeStreamId>().is_err());
    }

    #[test]
    fn test_backend_id_serialization() {
        let id = IncomeStreamId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: IncomeStreamId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_scenario_id_display() {
        let id = ScenarioId::new();
        let display = id.to_string();
        assert!(display.starts_with("scn-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_scenario_id_matches_short() {
        let id = ScenarioId::new();
        assert!(id.matches_short(&id.to_string()));
        assert!(id.matches_short(&id.short()));
        assert!(id.matches_short(&id.as_uuid().to_string()));
        assert!(!id.matches_short("ab"));
    }
}
