//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Extension, Router};

use crate::api::extractors::Credentials;
use crate::api::AppState;
use crate::config::LOGIN_SUCCESS_MESSAGE;
use crate::domain::{AuthError, CredentialPair, Principal, SecurityContext};
use crate::errors::{AppError, AppResult};
use crate::types::ApiResponse;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Log in with a username and password
///
/// The authenticated security context is attached to the response
/// extensions for outer layers.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body(
        content = CredentialPair,
        description = "JSON object or form-urlencoded fields",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Logged in successfully", body = LoginResponse),
        (status = 400, description = "Missing credentials or unknown user"),
        (status = 401, description = "Bad credentials, disabled or locked account"),
        (status = 500, description = "Unexpected failure")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Credentials(pair): Credentials,
) -> AppResult<(Extension<SecurityContext>, Json<ApiResponse<Principal>>)> {
    let mut context = SecurityContext::new();
    let principal = state
        .auth_service
        .authenticate(pair.as_ref(), &mut context)
        .await
        .map_err(|e| {
            if e == AuthError::UserNotFound {
                spend_decoy(&state, pair.as_ref());
            }
            AppError::from(state.unknown_user_policy.apply(e))
        })?;

    Ok((
        Extension(context),
        Json(ApiResponse::with_message(principal, LOGIN_SUCCESS_MESSAGE)),
    ))
}

/// Match the argon2 cost of a known username when the policy hides unknown ones.
fn spend_decoy(state: &AppState, pair: Option<&CredentialPair>) {
    let secret = pair.and_then(CredentialPair::fields).map(|(_, secret)| secret);
    if let (Some(decoy), Some(secret)) = (&state.decoy, secret) {
        decoy.spend(secret);
    }
}
