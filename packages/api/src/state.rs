use std::{sync::Arc, time::Duration};

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, Set,
};
use serde::{Deserialize, Serialize};

use crate::entity::{sea_orm_active_enums::Currency, setting, user};
use crate::error::ApiError;

pub type AppState = Arc<State>;

const SESSION_TTL_HOURS: i64 = 24;
const SETTINGS_CACHE_KEY: &str = "settings";

pub const DEFAULT_STORE_NAME: &str = "Faith Community Baptist School Bookshop";
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct State {
    pub db: DatabaseConnection,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Settings singleton, cached with a short TTL and invalidated on update
    settings_cache: moka::sync::Cache<&'static str, Arc<setting::Model>>,
}

impl State {
    pub async fn new() -> Self {
        let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let mut opt = ConnectOptions::new(db_url);
        opt.max_connections(10)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(
                std::env::var("SQLX_LOGGING")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false),
            );

        let db = Database::connect(opt)
            .await
            .expect("Failed to connect to database");

        Self::with_db(db, &jwt_secret)
    }

    /// Build a state around an existing connection; `new` and the test
    /// suites both funnel through here.
    pub fn with_db(db: DatabaseConnection, jwt_secret: &str) -> Self {
        Self {
            db,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            settings_cache: moka::sync::Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(60))
                .build(),
        }
    }

    pub fn issue_token(&self, user: &user::Model) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            iat: now,
            exp: now + SESSION_TTL_HOURS * 3600,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        let decoded = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(decoded.claims)
    }

    /// The settings singleton, created with defaults on first read.
    pub async fn settings(&self) -> Result<Arc<setting::Model>, ApiError> {
        if let Some(settings) = self.settings_cache.get(SETTINGS_CACHE_KEY) {
            return Ok(settings);
        }

        let settings = match setting::Entity::find().one(&self.db).await? {
            Some(model) => model,
            None => {
                let now = Utc::now().naive_utc();
                let model = setting::ActiveModel {
                    id: Set(cuid2::create_id()),
                    store_name: Set(DEFAULT_STORE_NAME.to_string()),
                    currency: Set(Currency::Ghs),
                    low_stock_threshold: Set(DEFAULT_LOW_STOCK_THRESHOLD),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                model.insert(&self.db).await?
            }
        };

        let settings = Arc::new(settings);
        self.settings_cache
            .insert(SETTINGS_CACHE_KEY, settings.clone());
        Ok(settings)
    }

    pub fn invalidate_settings(&self) {
        self.settings_cache.invalidate(SETTINGS_CACHE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let state = State::with_db(DatabaseConnection::default(), "test-secret");
        let now = Utc::now().naive_utc();
        let user = user::Model {
            id: "user123".to_string(),
            name: "ama".to_string(),
            email: "ama@example.com".to_string(),
            password_hash: "irrelevant".to_string(),
            created_at: now,
            updated_at: now,
        };

        let token = state.issue_token(&user).expect("Failed to sign token");
        let claims = state.validate_token(&token).expect("Failed to verify token");

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.name, user.name);
        assert_eq!(claims.email, user.email);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let state = State::with_db(DatabaseConnection::default(), "test-secret");
        let other = State::with_db(DatabaseConnection::default(), "other-secret");
        let now = Utc::now().naive_utc();
        let user = user::Model {
            id: "user123".to_string(),
            name: "ama".to_string(),
            email: "ama@example.com".to_string(),
            password_hash: "irrelevant".to_string(),
            created_at: now,
            updated_at: now,
        };

        let token = state.issue_token(&user).expect("Failed to sign token");
        assert!(other.validate_token(&token).is_err());
    }
}
