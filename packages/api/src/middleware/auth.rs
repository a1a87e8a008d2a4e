use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{error::AuthorizationError, state::AppState, unauthorized};

/// The authenticated caller, decoded once from the bearer token
#[derive(Debug, Clone)]
pub struct TokenUser {
    pub sub: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub enum AppUser {
    Token(TokenUser),
    Unauthorized,
}

impl AppUser {
    /// The caller's user id, or 401 for anonymous requests.
    /// Every protected handler goes through here.
    pub fn sub(&self) -> Result<String, AuthorizationError> {
        match self {
            AppUser::Token(user) => Ok(user.sub.clone()),
            AppUser::Unauthorized => Err(unauthorized!("Authentication required")),
        }
    }
}

/// Decodes the `Authorization: Bearer <token>` header and stashes the result
/// as an `AppUser` request extension. Requests without a valid token pass
/// through as `Unauthorized`; the handlers reject them via `AppUser::sub`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response<Body>, AuthorizationError> {
    let mut request = request;

    if let Some(auth_header) = request.headers().get(AUTHORIZATION)
        && let Ok(token) = auth_header.to_str()
    {
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();

        if let Ok(claims) = state.validate_token(token) {
            let user = AppUser::Token(TokenUser {
                sub: claims.sub,
                name: claims.name,
                email: claims.email,
            });
            request.extensions_mut().insert::<AppUser>(user);
            return Ok(next.run(request).await);
        }
    }

    request
        .extensions_mut()
        .insert::<AppUser>(AppUser::Unauthorized);
    Ok(next.run(request).await)
}
