//! HTTP status handling shared by every endpoint.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult, ForbiddenBody};

/// Problem document returned with 403.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProblemDto {
    title: String,
    detail: String,
    request_id: String,
    origin: String,
}

/// Map a status code and raw body to the body on success or a typed error.
pub fn check_status(status: StatusCode, body: String) -> ApiResult<String> {
    match status.as_u16() {
        200 => Ok(body),
        400 => Err(ApiError::BadRequest { body }),
        401 => Err(ApiError::Unauthorized),
        403 => Err(ApiError::Forbidden(parse_forbidden(body))),
        429 => Err(ApiError::RateLimited),
        other => Err(ApiError::Unexpected {
            status: other,
            body,
        }),
    }
}

fn parse_forbidden(body: String) -> ForbiddenBody {
    match serde_json::from_str::<ProblemDto>(&body) {
        Ok(problem) => ForbiddenBody::Structured {
            title: problem.title,
            detail: problem.detail,
            request_id: problem.request_id,
            origin: problem.origin,
        },
        Err(_) => ForbiddenBody::Raw(body),
    }
}

/// Decode a JSON body, treating an empty body or `null` as the default value.
pub fn decode<T>(body: &str) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
{
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    let parsed: Option<T> = serde_json::from_str(body)?;
    Ok(parsed.unwrap_or_default())
}
