/// Session identity middleware
///
/// Maps the opaque session cookie to a persisted user row. Browsers
/// showing up without a valid cookie get a fresh user and a `Set-Cookie`
/// on the way out; everything downstream only ever sees a `SessionUser`.
use crate::{error::ServerError, state::AppState};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Extension type carrying the resolved session user.
/// Can be used as an extractor in handlers.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: i64,
    pub session_id: String,
}

/// Middleware that resolves the session cookie to a user row, creating
/// both the row and the cookie when the browser has none.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let cookie_name = state.config.session.cookie_name.clone();
    let token = cookie_value(request.headers(), &cookie_name);

    let existing = match &token {
        Some(token) => muse_storage::users::find_by_session(&state.pool, token).await?,
        None => None,
    };

    // A cookie we don't recognize (expired database, pruned session) is
    // treated like no cookie at all.
    let (user, issued) = match existing {
        Some(user) => (user, false),
        None => {
            let fresh = Uuid::new_v4().to_string();
            let user = muse_storage::users::find_or_create(&state.pool, &fresh).await?;
            tracing::debug!(user_id = user.id, "created session user");
            (user, true)
        }
    };

    request.extensions_mut().insert(SessionUser {
        user_id: user.id,
        session_id: user.session_id.clone(),
    });

    let mut response = next.run(request).await;

    if issued {
        let cookie = build_cookie(
            &cookie_name,
            &user.session_id,
            i64::from(state.config.session.max_age_days) * 86_400,
        )?;
        response.headers_mut().append(SET_COOKIE, cookie);
    }

    Ok(response)
}

/// Implement FromRequestParts so SessionUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .ok_or_else(|| {
                ServerError::Internal("session middleware not installed".to_string())
            })
    }
}

/// Extract a cookie value from the request headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((key, value)) = pair.trim().split_once('=') {
                if key == name {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Build a `Set-Cookie` header value for a session-scoped cookie.
pub fn build_cookie(name: &str, value: &str, max_age_secs: i64) -> Result<HeaderValue, ServerError> {
    HeaderValue::from_str(&format!(
        "{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    ))
    .map_err(|e| ServerError::Internal(format!("invalid cookie value: {e}")))
}

/// Build a `Set-Cookie` header value that deletes a cookie.
pub fn expire_cookie(name: &str) -> Result<HeaderValue, ServerError> {
    build_cookie(name, "", 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_value_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("other=1; muse_session=abc-def; trailing=x"),
        );

        assert_eq!(
            cookie_value(&headers, "muse_session").as_deref(),
            Some("abc-def")
        );
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn build_cookie_is_http_only() {
        let cookie = build_cookie("muse_session", "token", 3600).unwrap();
        let value = cookie.to_str().unwrap();
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Max-Age=3600"));
        assert!(value.starts_with("muse_session=token"));
    }
}
