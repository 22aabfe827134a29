use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde_json::Value;

use crate::error::AppError;

/// A JSON request body that insists on an `application/json` content type.
///
/// A missing or different content type is rejected with 415 before the body is
/// read; a body that is not JSON is a 400.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

const EXPECTED: &str = "application/json";

pub fn check_content_type(content_type: Option<&str>) -> Result<(), AppError> {
    let Some(content_type) = content_type else {
        return Err(AppError::UnsupportedMediaType(format!(
            "Content-Type must be {EXPECTED}"
        )));
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();
    if !mime.eq_ignore_ascii_case(EXPECTED) {
        return Err(AppError::UnsupportedMediaType(format!(
            "Content-Type must be {EXPECTED}"
        )));
    }
    Ok(())
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        check_content_type(content_type)?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| AppError::BadRequest(err.body_text()))?;
        let value = serde_json::from_slice(&bytes)
            .map_err(|err| AppError::BadRequest(format!("Invalid JSON body: {err}")))?;
        Ok(JsonBody(value))
    }
}
