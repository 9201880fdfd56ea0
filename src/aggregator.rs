//! Profile + posts aggregation.
//!
//! Both upstream fetches run as independent tasks and are always joined
//! before the outcome is decided. Profile existence dominates: once a profile
//! is found only the posts error matters, and the profile fetch's outcome is
//! only consulted when no profile came back.

use crate::error::{AggregateError, UpstreamError};
use crate::models::{PostSummary, UserPosts, UserProfile};
use crate::upstream::{HttpTransport, UpstreamClient};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::debug;

/// Merges a user's profile and posts into one [`UserPosts`].
pub struct UserPostsAggregator<T> {
    client: Arc<UpstreamClient<T>>,
}

impl<T> Clone for UserPostsAggregator<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<T: HttpTransport + 'static> UserPostsAggregator<T> {
    pub fn new(client: UpstreamClient<T>) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn client(&self) -> &UpstreamClient<T> {
        &self.client
    }

    /// Fetch and merge everything known about `id`.
    ///
    /// - `Ok(Some(_))`: profile found and posts fetched.
    /// - `Ok(None)`: upstream has no such user.
    /// - `Err(_)`: the one error that survived the merge.
    pub async fn aggregate(&self, id: i64) -> Result<Option<UserPosts>, AggregateError> {
        let user_client = Arc::clone(&self.client);
        let user_task = tokio::spawn(async move { user_client.fetch_user_by_id(id).await });

        let posts_client = Arc::clone(&self.client);
        let posts_task = tokio::spawn(async move { posts_client.fetch_posts_by_user_id(id).await });

        // Wait for both; a fast failure never cancels the other fetch.
        let (user, posts) = futures::future::join(user_task, posts_task).await;

        let outcome = merge(
            flatten(user, "user profile"),
            flatten(posts, "user posts"),
        );

        match &outcome {
            Ok(Some(merged)) => debug!("userId={} aggregated with {} posts", id, merged.posts.len()),
            Ok(None) => debug!("userId={} not found", id),
            Err(e) => debug!("userId={} aggregation failed: {}", id, e),
        }

        outcome
    }
}

fn flatten<V>(
    joined: Result<Result<V, UpstreamError>, JoinError>,
    fetch: &'static str,
) -> Result<V, AggregateError> {
    match joined {
        Ok(result) => result.map_err(AggregateError::from),
        Err(e) => Err(AggregateError::TaskFailed {
            fetch,
            reason: e.to_string(),
        }),
    }
}

/// Resolve the pair of fetch outcomes into one result.
fn merge(
    user: Result<Option<UserProfile>, AggregateError>,
    posts: Result<Vec<PostSummary>, AggregateError>,
) -> Result<Option<UserPosts>, AggregateError> {
    match user {
        Ok(Some(profile)) => posts.map(|posts| Some(UserPosts::new(profile, posts))),
        Ok(None) => Ok(None),
        Err(e) => Err(e),
    }
}
