//! Client for the upstream Users and Posts APIs.
//!
//! Pure API integration: translate transport and status outcomes into typed
//! results. Merging lives in the aggregator.

use super::transport::{HttpTransport, TransportResponse, UpstreamRequest};
use crate::error::UpstreamError;
use crate::models::{PostSummary, UserProfile};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

// Request-construction errors name the user API without the "By ID" suffix.
const GET_USER_REQUEST_API: &str = "Get User";
const GET_USER_API: &str = "Get User By ID";
const GET_POSTS_API: &str = "Get Posts";

/// Upstream API client over any [`HttpTransport`].
pub struct UpstreamClient<T> {
    transport: T,
    base_url: String,
}

impl<T: HttpTransport> UpstreamClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch a user's profile.
    ///
    /// A 404 is the upstream's "no such user" signal and yields `Ok(None)`.
    pub async fn fetch_user_by_id(&self, id: i64) -> Result<Option<UserProfile>, UpstreamError> {
        let url = self
            .endpoint(&format!("users/{}", id))
            .map_err(|reason| UpstreamError::RequestConstruction {
                api: GET_USER_REQUEST_API,
                reason,
            })?;

        let resource = format!("userId={}", id);
        let response = self.send(url, &resource).await?;

        match response.status {
            StatusCode::OK => {
                let profile = decode::<UserProfile>(response, "user", GET_USER_API)?;
                Ok(Some(profile))
            }
            StatusCode::NOT_FOUND => {
                debug!("User {} not found upstream", id);
                Ok(None)
            }
            _ => Err(server_error(response, resource)),
        }
    }

    /// Fetch the posts owned by a user.
    ///
    /// The upstream answers 200 with `[]` when the user has no posts (or does
    /// not exist), so every non-200 status is an error here, 404 included. A
    /// `null` body decodes as no posts.
    pub async fn fetch_posts_by_user_id(&self, id: i64) -> Result<Vec<PostSummary>, UpstreamError> {
        let mut url = self
            .endpoint("posts")
            .map_err(|reason| UpstreamError::RequestConstruction {
                api: GET_POSTS_API,
                reason,
            })?;
        url.query_pairs_mut().append_pair("userId", &id.to_string());

        let resource = format!("posts for userId={}", id);
        let response = self.send(url, &resource).await?;

        if response.status == StatusCode::OK {
            decode::<Option<Vec<PostSummary>>>(response, "[]postSummary", GET_POSTS_API)
                .map(Option::unwrap_or_default)
        } else {
            Err(server_error(response, resource))
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, String> {
        let raw = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| e.to_string())
    }

    async fn send(&self, url: Url, resource: &str) -> Result<TransportResponse, UpstreamError> {
        debug!("Fetching {} from {}", resource, url);

        self.transport
            .execute(UpstreamRequest::get(url))
            .await
            .map_err(|e| UpstreamError::Communication {
                resource: resource.to_string(),
                reason: e.to_string(),
            })
    }
}

fn decode<M: DeserializeOwned>(
    response: TransportResponse,
    model: &'static str,
    api: &'static str,
) -> Result<M, UpstreamError> {
    let decode_err = |reason: String| UpstreamError::Decode { model, api, reason };

    let body = response.body.map_err(|e| decode_err(e.to_string()))?;
    serde_json::from_slice(&body).map_err(|e| decode_err(e.to_string()))
}

fn server_error(response: TransportResponse, resource: String) -> UpstreamError {
    match response.body {
        Ok(body) => {
            warn!("Upstream returned {} fetching {}", response.status, resource);
            UpstreamError::Server {
                resource,
                body: String::from_utf8_lossy(&body).into_owned(),
            }
        }
        Err(e) => UpstreamError::BodyRead {
            resource,
            reason: e.to_string(),
        },
    }
}
