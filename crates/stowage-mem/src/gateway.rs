use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use stowage_bucket::{BucketError, BucketResult};

use crate::object::Object;
use crate::store::ObjectStore;

/// Route serving stored objects.
pub const FILES_ROUTE: &str = "/files";

/// Query parameter carrying the object key.
pub const FILENAME_PARAM: &str = "filename";

/// Build the gateway router over the shared store.
///
/// The gateway performs no authentication and never enforces the expiry a
/// signed URL was generated with: a URL keeps working for as long as the
/// object exists in the store.
pub fn router(store: Arc<ObjectStore>) -> Router {
    Router::new()
        .route(FILES_ROUTE, get(serve_object))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Retrieval handler: validate the parameter, look the key up, respond
/// exactly once. A miss short-circuits before any object field is touched.
async fn serve_object(
    State(store): State<Arc<ObjectStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(filename) = params.get(FILENAME_PARAM) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("missing required query parameter: {FILENAME_PARAM}"),
        );
    };

    match lookup(&store, filename) {
        Ok(object) => {
            let disposition = format!("attachment; filename=\"{}\"", object.key);
            ([(header::CONTENT_DISPOSITION, disposition)], object.content).into_response()
        }
        Err(err) => error_response(status_for(&err), err.to_string()),
    }
}

fn lookup(store: &ObjectStore, key: &str) -> BucketResult<Object> {
    store
        .get(key)
        .ok_or_else(|| BucketError::NotFound(key.to_string()))
}

fn status_for(err: &BucketError) -> StatusCode {
    match err {
        BucketError::NotFound(_) => StatusCode::NOT_FOUND,
        // Anything else reaching the gateway is an internal condition.
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use bytes::Bytes;
    use tower::util::ServiceExt;

    fn seeded_store() -> Arc<ObjectStore> {
        let store = Arc::new(ObjectStore::new());
        store.put(Object::new("report.csv", Bytes::from_static(b"a,b,c\n1,2,3\n")));
        store
    }

    async fn body_bytes(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn get_existing_object() {
        let app = router(seeded_store());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/files?filename=report.csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .expect("disposition header present")
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(disposition, "attachment; filename=\"report.csv\"");
        assert_eq!(body_bytes(response).await.as_ref(), b"a,b,c\n1,2,3\n");
    }

    #[tokio::test]
    async fn get_missing_object_is_404_json() {
        let app = router(seeded_store());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/files?filename=not-there")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("no object stored under key"));
    }

    #[tokio::test]
    async fn missing_parameter_is_400_json() {
        let app = router(seeded_store());
        let response = app
            .oneshot(Request::builder().uri("/files").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body["error"].as_str().unwrap().contains(FILENAME_PARAM));
    }

    #[tokio::test]
    async fn non_get_method_is_405() {
        let app = router(seeded_store());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/files?filename=report.csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn percent_encoded_keys_are_decoded() {
        let store = Arc::new(ObjectStore::new());
        store.put(Object::new("with space.txt", Bytes::from_static(b"spaced")));

        let app = router(store);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/files?filename=with%20space.txt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await.as_ref(), b"spaced");
    }
}
