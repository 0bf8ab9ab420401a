use serde_derive::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    num::ParseIntError,
    str::FromStr,
};

/// A Roblox user's numeric identifier.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    /// Interpret a loosely-typed JSON value (e.g. from a request body) as a
    /// user ID.
    ///
    /// Both positive integers and strings of digits are accepted, everything
    /// else (zero, negatives, floats, booleans, ...) is rejected.
    pub fn from_json(value: &serde_json::Value) -> Option<UserId> {
        let id = match value {
            serde_json::Value::Number(n) => n.as_u64()?,
            serde_json::Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };

        if id == 0 {
            None
        } else {
            Some(UserId(id))
        }
    }
}

impl From<u64> for UserId {
    fn from(other: u64) -> UserId { UserId(other) }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<UserId, Self::Err> { s.parse().map(UserId) }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}
