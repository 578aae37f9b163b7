//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request IDs (UUID v4)
//! - Extract the request context (original URL, request ID)
//! - Turn the query string and JSON body into field maps
//!
//! # Design Decisions
//! - No query string = no query; no body bytes = no body
//! - A body that is not a JSON object is a user error
//! - Only an over-limit body is a user error; other read failures are internal
//! - Repeated query keys keep the last value

use axum::body::Body;
use axum::extract::{OriginalUri, Query};
use axum::http::{Request, Uri};
use http_body_util::LengthLimitError;
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::handler::ApiRequest;
use crate::api::response::RequestContext;
use crate::api::validation::{FieldMap, RequestData};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Context for logging and responses, read from the request head.
pub fn request_context<B>(request: &Request<B>) -> RequestContext {
    let original_url = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.to_string())
        .unwrap_or_else(|| request.uri().to_string());

    let context = RequestContext::new(original_url);
    match request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
    {
        Some(id) => context.with_request_id(id),
        None => context,
    }
}

/// Parse the query string into a field map. `None` when the URI has no query.
pub fn query_fields(uri: &Uri) -> ApiResult<Option<FieldMap>> {
    if uri.query().is_none() {
        return Ok(None);
    }
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map_err(|_| ApiError::user("Malformed request query"))?;

    let fields = pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    Ok(Some(fields))
}

/// Parse a JSON object body into a field map. `None` when the body is empty.
pub fn body_fields(bytes: &[u8]) -> ApiResult<Option<FieldMap>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(fields)) => Ok(Some(fields)),
        _ => Err(ApiError::user("Malformed request body")),
    }
}

/// Read an HTTP request into an [`ApiRequest`], buffering at most `max_body_bytes`.
pub async fn extract_api_request(
    request: Request<Body>,
    context: RequestContext,
    max_body_bytes: usize,
) -> ApiResult<ApiRequest> {
    let (parts, body) = request.into_parts();
    let query = query_fields(&parts.uri)?;

    let bytes = axum::body::to_bytes(body, max_body_bytes)
        .await
        .map_err(body_read_error)?;
    let body = body_fields(&bytes)?;

    Ok(ApiRequest::new(RequestData::new(body, query), context))
}

fn body_read_error(error: axum::Error) -> ApiError {
    let error = error.into_inner();
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(&*error);
    while let Some(current) = source {
        if current.is::<LengthLimitError>() {
            return ApiError::user("Request body too large");
        }
        source = current.source();
    }
    ApiError::internal(format!("Failed to read request body: {error}"))
}
