use super::Friend;
use std::str::FromStr;

/// How a friends list should be ordered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Name,
    DisplayName,
    /// Keep whatever order Roblox gave us.
    Unsorted,
}

impl Default for SortOrder {
    fn default() -> Self { SortOrder::Name }
}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortOrder::Name),
            "display-name" | "displayName" => Ok(SortOrder::DisplayName),
            "none" => Ok(SortOrder::Unsorted),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown sort order \"{0}\", expected name, display-name or none")]
pub struct UnknownSortOrder(String);

/// Narrow down and order a friends list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FriendQuery {
    /// Only keep friends whose name or display name contains this
    /// (case-insensitive).
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl FriendQuery {
    pub fn matches(&self, friend: &Friend) -> bool {
        let needle = match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => needle.to_lowercase(),
            _ => return true,
        };

        friend.name.to_lowercase().contains(&needle)
            || friend.display_name.to_lowercase().contains(&needle)
    }

    pub fn apply<'a>(&self, friends: &'a [Friend]) -> Vec<&'a Friend> {
        let mut selected: Vec<&Friend> =
            friends.iter().filter(|f| self.matches(f)).collect();

        match self.sort {
            SortOrder::Name => {
                selected.sort_by_cached_key(|f| f.name.to_lowercase())
            },
            SortOrder::DisplayName => {
                selected.sort_by_cached_key(|f| f.display_name.to_lowercase())
            },
            SortOrder::Unsorted => {},
        }

        selected
    }
}
