use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::auth::{self, Claims, TokenError};
use crate::error::ApiError;

/// Authenticated user context extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user: i64,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { user: claims.user }
    }
}

/// Token verification middleware with three terminal outcomes: run the
/// downstream handler, reissue an expired access token and halt, or reject.
///
/// A request whose access token has merely expired is answered with a fresh
/// token (minted from the refresh token) instead of a 401; the original
/// request is NOT re-dispatched, the caller retries with the new token.
pub async fn verify_token(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    let access_token = bearer_token(&headers);
    let refresh_token = headers
        .get("refresh-token")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let (Some(access_token), Some(refresh_token)) = (access_token, refresh_token) else {
        return ApiError::unauthorized("Unauthorized: No tokens provided").into_response();
    };

    match auth::verify_access_token(&access_token) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser::from(claims));
            next.run(request).await
        }
        Err(TokenError::MissingSecret) => {
            ApiError::internal_server_error("Internal Server Error: Missing access token secret")
                .into_response()
        }
        Err(err) if err.is_expiry() => reissue_access_token(&refresh_token),
        Err(TokenError::Verification(_)) => ApiError::forbidden("Forbidden").into_response(),
    }
}

/// The reissue-and-halt arm: verify the refresh token, mint a new access
/// token for the same identity, and answer 200 with both tokens as body and
/// cookies.
fn reissue_access_token(refresh_token: &str) -> Response {
    let claims = match auth::verify_refresh_token(refresh_token) {
        Ok(claims) => claims,
        Err(TokenError::MissingSecret) => {
            return ApiError::internal_server_error(
                "Internal Server Error: Missing refresh token secret",
            )
            .into_response();
        }
        Err(TokenError::Verification(err)) => {
            tracing::debug!("refresh token rejected: {err}");
            return ApiError::unauthorized("Unauthorized: Invalid refresh token").into_response();
        }
    };

    let new_access_token = match auth::generate_access_token(claims.user) {
        Ok(token) => token,
        Err(_) => {
            return ApiError::internal_server_error(
                "Internal Server Error: Missing access token secret",
            )
            .into_response();
        }
    };

    let mut response = (
        StatusCode::OK,
        Json(json!({
            "accessToken": new_access_token,
            "refreshToken": refresh_token,
        })),
    )
        .into_response();

    for cookie in [
        format!("accessToken={new_access_token}; HttpOnly; SameSite=Strict"),
        format!("refreshToken={refresh_token}; HttpOnly; SameSite=Strict"),
    ] {
        match header::HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(err) => {
                tracing::error!("failed to encode session cookie: {err}");
                return ApiError::internal_server_error("Internal server error").into_response();
            }
        }
    }

    response
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}
