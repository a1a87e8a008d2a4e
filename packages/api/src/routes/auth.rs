use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::user,
    error::ApiError,
    state::AppState,
    unauthorized,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub user: UserInfo,
}

impl TokenResponse {
    fn for_user(state: &AppState, user: &user::Model) -> Result<Self, ApiError> {
        let token = state.issue_token(user)?;
        Ok(Self {
            token,
            user: UserInfo {
                id: user.id.clone(),
                name: user.name.clone(),
                email: user.email.clone(),
            },
        })
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token for valid credentials", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
#[tracing::instrument(name = "POST /auth/login", skip(state, req))]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = user::Entity::find()
        .filter(user::Column::Name.eq(&req.name))
        .one(&state.db)
        .await?
        .ok_or_else(|| unauthorized!("Invalid credentials"))?;

    // Same response for unknown name and wrong password
    if !bcrypt::verify(&req.password, &user.password_hash)? {
        return Err(unauthorized!("Invalid credentials"));
    }

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(TokenResponse::for_user(&state, &user)?))
}

#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created, session token issued", body = TokenResponse),
        (status = 400, description = "Missing fields"),
        (status = 409, description = "Name or email already taken")
    )
)]
#[tracing::instrument(name = "POST /auth/signup", skip(state, req))]
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let name = req.name.trim();
    let email = req.email.trim();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request(
            "name, email and password are required".to_string(),
        ));
    }

    let existing = user::Entity::find()
        .filter(
            user::Column::Name
                .eq(name)
                .or(user::Column::Email.eq(email)),
        )
        .one(&state.db)
        .await?;

    if let Some(existing) = existing {
        let field = if existing.email == email { "email" } else { "name" };
        return Err(ApiError::conflict(format!(
            "User with this {} already exists",
            field
        )));
    }

    let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;
    let now = Utc::now().naive_utc();

    let user = user::ActiveModel {
        id: Set(cuid2::create_id()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    tracing::info!(user_id = %user.id, "User account created");

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse::for_user(&state, &user)?),
    ))
}
