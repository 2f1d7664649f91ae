//! Login body extractor.
//!
//! Accepts either a JSON object or form-urlencoded fields. An empty or
//! `null` body yields no pair at all; field presence is checked later by
//! the credential validator, not here. When the body carries nothing, a
//! `?username=..&password=..` query string is used instead.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Query, Request},
    http::{header::CONTENT_TYPE, HeaderValue, Uri},
    Form,
};

use crate::domain::CredentialPair;
use crate::errors::{AppError, AppResult};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Possibly-absent credential pair taken from the request.
#[derive(Debug)]
pub struct Credentials(pub Option<CredentialPair>);

/// Media types compare case-insensitively and ignore parameters.
fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

fn from_query(uri: &Uri) -> AppResult<Option<CredentialPair>> {
    if uri.query().map_or(true, str::is_empty) {
        return Ok(None);
    }
    let Query(pair) = Query::<CredentialPair>::try_from_uri(uri)
        .map_err(|e| AppError::bad_request(e.body_text()))?;
    Ok(Some(pair))
}

#[async_trait]
impl<S> FromRequest<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            // `Form` matches the header by prefix, so hand it the canonical spelling.
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
            let Form(pair) = Form::<CredentialPair>::from_request(req, state)
                .await
                .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
            return Ok(Credentials(Some(pair)));
        }

        let uri = req.uri().clone();
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;

        let pair = if body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            serde_json::from_slice::<Option<CredentialPair>>(&body)
                .map_err(|e| AppError::bad_request(e.to_string()))?
        };

        match pair {
            Some(pair) => Ok(Credentials(Some(pair))),
            None => Ok(Credentials(from_query(&uri)?)),
        }
    }
}
