//! Data models for the user-posts service.
//!
//! Upstream records are decoded into [`UserProfile`] and [`PostSummary`],
//! keeping only the fields this service exposes. [`UserPosts`] is the single
//! successful output shape.
//!
//! Upstream decoding is lenient: a missing or `null` field takes its default
//! value instead of failing the whole record.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A user as returned by the upstream Users API.
///
/// Only the subset of fields this service consumes; anything else in the
/// upstream payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

/// One upstream post with its user linkage removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
}

/// Profile fields embedded in [`UserPosts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub username: String,
    pub email: String,
}

/// A user's profile merged with their posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPosts {
    pub id: i64,
    pub user_info: UserInfo,
    /// In upstream response order.
    pub posts: Vec<PostSummary>,
}

impl UserPosts {
    /// Merge a found profile with its posts.
    pub fn new(profile: UserProfile, posts: Vec<PostSummary>) -> Self {
        Self {
            id: profile.id,
            user_info: UserInfo {
                name: profile.name,
                username: profile.username,
                email: profile.email,
            },
            posts,
        }
    }
}
