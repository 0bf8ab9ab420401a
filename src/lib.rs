//! A proxy and command-line client for managing your Roblox friends list.
//!
//! The proxy forwards a user's `.ROBLOSECURITY` cookie to the Roblox web
//! API, stitches the friends list together with names and avatars, and
//! removes friends one at a time so Roblox's rate limits aren't tripped.

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod api;
pub mod client;
mod config;
mod credential;
pub mod endpoints;
mod friends;
mod id;
mod removal;
pub mod server;
#[cfg(test)]
mod test_utils;

pub use client::{ClientError, ProxyClient};
pub use config::{Config, Environment, UnknownEnvironment};
pub use credential::{BlankCredential, Credential};
pub use friends::{
    batches, fetch_friends, FetchFriendsError, Friend, FriendQuery, SortOrder,
    UnknownSortOrder, MAX_BATCH_SIZE, PLACEHOLDER_THUMBNAIL, UNKNOWN_NAME,
};
pub use id::UserId;
pub use removal::{
    unfriend_many, unfriend_one, BatchError, BatchOutcome, UnfriendError,
    UnfriendResult, DEFAULT_UNFRIEND_DELAY,
};

/// The default user agent to use when communicating with the Roblox servers.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));
