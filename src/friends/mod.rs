//! Assembling the user's friends list.

mod query;

pub use query::{FriendQuery, SortOrder, UnknownSortOrder};

use crate::{
    endpoints::{self, EndpointError, FriendEntry, Hosts, UserDetails},
    Credential, UserId,
};
use reqwest::Client;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;

/// The most user IDs Roblox will accept in a single batch lookup.
pub const MAX_BATCH_SIZE: usize = 100;
/// Used when Roblox doesn't tell us a friend's name.
pub const UNKNOWN_NAME: &str = "Unknown";
/// Used when Roblox doesn't give us an avatar headshot.
pub const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/150";

/// Everything we know about one of the user's friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub id: UserId,
    pub name: String,
    pub display_name: String,
    pub is_online: bool,
    pub thumbnail: String,
}

/// Split a list of IDs into batches small enough for Roblox's bulk lookups.
pub fn batches(ids: &[UserId]) -> impl Iterator<Item = &[UserId]> + '_ {
    ids.chunks(MAX_BATCH_SIZE)
}

/// Fetch the credential owner's friends, along with their names and avatars.
///
/// Batches are looked up one after another. If any request fails the whole
/// operation fails, we never hand back a partial list.
pub async fn fetch_friends(
    client: &Client,
    hosts: &Hosts,
    credential: &Credential,
) -> Result<Vec<Friend>, FetchFriendsError> {
    let me = endpoints::authenticated_user(client, hosts, credential)
        .await
        .map_err(FetchFriendsError::Identity)?;

    let entries = endpoints::friends(client, hosts, credential, me.id)
        .await
        .map_err(FetchFriendsError::FriendsList)?;

    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<UserId> = entries.iter().map(|entry| entry.id).collect();
    let mut details = HashMap::new();
    let mut thumbnails = HashMap::new();

    for batch in batches(&ids) {
        let users = endpoints::user_details(client, hosts, credential, batch)
            .await
            .map_err(|source| FetchFriendsError::Enrichment {
                count: batch.len(),
                source,
            })?;
        details.extend(users.into_iter().map(|user| (user.id, user)));

        let headshots =
            endpoints::avatar_headshots(client, hosts, credential, batch)
                .await
                .map_err(|source| FetchFriendsError::Enrichment {
                    count: batch.len(),
                    source,
                })?;
        thumbnails.extend(headshots.into_iter().filter_map(|thumbnail| {
            thumbnail.image_url.map(|url| (thumbnail.target_id, url))
        }));
    }

    let friends = merge(&entries, &details, &thumbnails);
    log::info!("Fetched {} friends for {:?}", friends.len(), me.name);

    Ok(friends)
}

/// Join the friends list with the details and thumbnails we looked up,
/// preserving the friends list's order.
fn merge(
    entries: &[FriendEntry],
    details: &HashMap<UserId, UserDetails>,
    thumbnails: &HashMap<UserId, String>,
) -> Vec<Friend> {
    entries
        .iter()
        .map(|entry| {
            let user = details.get(&entry.id);

            Friend {
                id: entry.id,
                name: or_unknown(user.map(|u| u.name.as_str())),
                display_name: or_unknown(
                    user.map(|u| u.display_name.as_str()),
                ),
                is_online: entry.is_online.unwrap_or(false),
                thumbnail: thumbnails
                    .get(&entry.id)
                    .filter(|url| !url.is_empty())
                    .cloned()
                    .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string()),
            }
        })
        .collect()
}

fn or_unknown(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => UNKNOWN_NAME.to_string(),
    }
}

/// The ways [`fetch_friends()`] can fail.
#[derive(Debug, thiserror::Error)]
pub enum FetchFriendsError {
    #[error("Unable to find out who the credential belongs to")]
    Identity(#[source] EndpointError),
    #[error("Unable to fetch the friends list")]
    FriendsList(#[source] EndpointError),
    #[error("Unable to look up a batch of {count} friends")]
    Enrichment {
        count: usize,
        #[source]
        source: EndpointError,
    },
}

impl FetchFriendsError {
    /// Was the credential itself rejected?
    pub fn is_auth_failure(&self) -> bool {
        match self {
            FetchFriendsError::Identity(e) => e.is_auth_failure(),
            _ => false,
        }
    }
}
