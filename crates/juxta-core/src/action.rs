//! Delta actions applied to the canonical comparison set.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseActionError;

/// Suffix used by the update route (`/comparison/update/add.json`).
const ROUTE_SUFFIX: &str = ".json";

/// Mutation requested against the canonical set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareAction {
    /// Insert ids into the set.
    Add,
    /// Discard ids from the set.
    Remove,
}

impl CompareAction {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }

    /// Path of the update endpoint for this action, relative to the service root.
    #[must_use]
    pub fn update_path(self) -> String {
        format!("/comparison/update/{}{ROUTE_SUFFIX}", self.as_str())
    }

    /// Parse the final route segment, e.g. `remove.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseActionError`] when the segment lacks the `.json` suffix or names
    /// an unknown action.
    pub fn from_path_segment(segment: &str) -> Result<Self, ParseActionError> {
        segment
            .strip_suffix(ROUTE_SUFFIX)
            .ok_or_else(|| ParseActionError {
                value: segment.to_string(),
            })?
            .parse()
    }

    /// Membership a group ends up with once this action is confirmed.
    #[must_use]
    pub const fn selects(self) -> bool {
        matches!(self, Self::Add)
    }
}

impl FromStr for CompareAction {
    type Err = ParseActionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            other => Err(ParseActionError {
                value: other.to_string(),
            }),
        }
    }
}

impl Display for CompareAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("add".parse::<CompareAction>(), Ok(CompareAction::Add));
        assert_eq!("remove".parse::<CompareAction>(), Ok(CompareAction::Remove));
        assert!("Add".parse::<CompareAction>().is_err());
    }

    #[test]
    fn path_segment_requires_json_suffix() {
        assert_eq!(
            CompareAction::from_path_segment("add.json"),
            Ok(CompareAction::Add)
        );
        assert_eq!(
            CompareAction::from_path_segment("remove.json"),
            Ok(CompareAction::Remove)
        );
        let err = CompareAction::from_path_segment("add").unwrap_err();
        assert_eq!(err.value, "add");
        let err = CompareAction::from_path_segment("clear.json").unwrap_err();
        assert_eq!(err.value, "clear");
    }

    #[test]
    fn update_path_matches_route_shape() {
        assert_eq!(
            CompareAction::Add.update_path(),
            "/comparison/update/add.json"
        );
        assert_eq!(
            CompareAction::Remove.update_path(),
            "/comparison/update/remove.json"
        );
    }

    #[test]
    fn selects_tracks_resulting_membership() {
        assert!(CompareAction::Add.selects());
        assert!(!CompareAction::Remove.selects());
        assert_eq!(CompareAction::Remove.to_string(), "remove");
    }
}
