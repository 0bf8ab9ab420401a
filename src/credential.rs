use std::{
    fmt::{self, Debug, Formatter},
    str::FromStr,
};

/// The name of the cookie Roblox uses to identify a logged-in user.
pub const SESSION_COOKIE: &str = ".ROBLOSECURITY";

/// An opaque session credential (the user's `.ROBLOSECURITY` cookie).
///
/// We never look inside it. Whether it is any good is decided entirely by
/// the upstream servers accepting or rejecting it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a caller-supplied cookie, returning `None` when it is blank.
    pub fn new<S: Into<String>>(raw: S) -> Option<Self> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            None
        } else {
            Some(Credential(raw))
        }
    }

    pub fn as_str(&self) -> &str { &self.0 }

    /// The value to send in a `Cookie` header.
    pub fn cookie_header(&self) -> String {
        format!("{}={}", SESSION_COOKIE, self.0)
    }
}

/// Parse a cookie the user pasted in, trimming any stray whitespace.
impl FromStr for Credential {
    type Err = BlankCredential;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Credential::new(s.trim()).ok_or(BlankCredential)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
#[error("The Roblox cookie can't be empty")]
pub struct BlankCredential;

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}
