//! Request handlers.
//!
//! Maps aggregation outcomes onto HTTP responses: 200 with the merged record,
//! 404 when the user does not exist, 500 with the error text otherwise. A
//! non-integer id is rejected with 400 before any upstream call.

use crate::aggregator::UserPostsAggregator;
use crate::upstream::HttpTransport;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};

/// Error/status body: `{"message": "..."}`.
#[derive(Debug, Serialize)]
struct Message {
    message: String,
}

impl Message {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `GET /v1/user-posts/:user_id`
pub async fn get_user_posts<T: HttpTransport + 'static>(
    State(aggregator): State<UserPostsAggregator<T>>,
    Path(user_id): Path<String>,
) -> Response {
    let id = match user_id.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            debug!("Rejecting non-integer userId '{}'", user_id);
            return indented_json(
                StatusCode::BAD_REQUEST,
                &Message::new(format!(
                    "Expected ID in integer format, but got '{}' instead",
                    user_id
                )),
            );
        }
    };

    match aggregator.aggregate(id).await {
        Ok(Some(user_posts)) => indented_json(StatusCode::OK, &user_posts),
        Ok(None) => indented_json(
            StatusCode::NOT_FOUND,
            &Message::new(format!("Could not find userId={}", user_id)),
        ),
        Err(e) => {
            error!("Failed to aggregate userId={} ({}): {}", id, e.kind(), e);
            indented_json(StatusCode::INTERNAL_SERVER_ERROR, &Message::new(e.to_string()))
        }
    }
}

/// Serialize `value` as JSON indented with four spaces.
fn indented_json<V: Serialize>(status: StatusCode, value: &V) -> Response {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    match value.serialize(&mut serializer) {
        Ok(()) => (
            status,
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            buf,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to serialize response body: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::stub::{ok_json, status, StubTransport, CHACHA_POSTS, CHACHA_USER};
    use crate::upstream::UpstreamClient;

    fn aggregator(transport: StubTransport) -> UserPostsAggregator<StubTransport> {
        UserPostsAggregator::new(UpstreamClient::new(transport, "http://upstream.test"))
    }

    async fn call(
        aggregator: UserPostsAggregator<StubTransport>,
        user_id: &str,
    ) -> (StatusCode, String) {
        let response = get_user_posts(State(aggregator), Path(user_id.to_string())).await;
        let code = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (code, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_get_user_posts_success() {
        let agg = aggregator(StubTransport::routes(ok_json(CHACHA_USER), ok_json(CHACHA_POSTS)));

        let (code, body) = call(agg, "987654").await;

        assert_eq!(code, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 987654,
                "userInfo": {
                    "name": "Chacha",
                    "username": "chacha22",
                    "email": "chacha22@gmail.com"
                },
                "posts": [{"id": 42, "title": "How to Adult", "body": "N/A"}]
            })
        );
    }

    #[tokio::test]
    async fn test_get_user_posts_bad_id_skips_upstream() {
        let agg = aggregator(StubTransport::routes(ok_json(CHACHA_USER), ok_json(CHACHA_POSTS)));
        let handle = agg.clone();

        let (code, body) = call(agg, "test-123").await;

        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            "{\n    \"message\": \"Expected ID in integer format, but got 'test-123' instead\"\n}"
        );
        assert_eq!(handle.client().transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_get_user_posts_not_found() {
        let agg = aggregator(StubTransport::routes(status(404, ""), ok_json("")));

        let (code, body) = call(agg, "987654").await;

        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(body, "{\n    \"message\": \"Could not find userId=987654\"\n}");
    }

    #[tokio::test]
    async fn test_get_user_posts_upstream_failure() {
        let agg = aggregator(StubTransport::routes(status(500, "world.execute (me);"), ok_json("")));

        let (code, body) = call(agg, "987654").await;

        assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            "{\n    \"message\": \"Unexpected server error occurred trying to fetch userId=987654 from Cool Vendor: world.execute (me);\"\n}"
        );
    }
}
