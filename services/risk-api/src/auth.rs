//! Token issuance and verification for the dashboard users.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token is missing")]
    MissingToken,

    #[error("token is invalid: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),

    #[error("credentials missing")]
    MissingCredentials,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing required fields")]
    MissingFields,

    #[error("user already exists")]
    UserExists,

    #[error("failed to issue token: {0}")]
    TokenIssue(jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub role: Role,
    pub exp: usize,
}

struct UserRecord {
    password_hash: String,
    role: Role,
}

/// In-memory account store, built once at startup.
#[derive(Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_demo_accounts() -> Self {
        let store = Self::new();
        // Fresh store, inserts cannot collide
        let _ = store.insert("admin@fraud-detection.com", "admin123", Role::Admin);
        let _ = store.insert("user@fraud-detection.com", "user123", Role::User);
        store
    }

    pub fn insert(&self, email: &str, password: &str, role: Role) -> Result<(), AuthError> {
        let mut users = self.users.write();
        if users.contains_key(email) {
            return Err(AuthError::UserExists);
        }
        users.insert(
            email.to_string(),
            UserRecord {
                password_hash: hash_password(password),
                role,
            },
        );
        Ok(())
    }

    pub fn check_password(&self, email: &str, password: &str) -> Result<Role, AuthError> {
        let users = self.users.read();
        match users.get(email) {
            Some(record) if record.password_hash == hash_password(password) => Ok(record.role),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

pub struct Authenticator {
    store: UserStore,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl Authenticator {
    pub fn new(secret: &str, token_ttl_hours: i64, store: UserStore) -> Self {
        Self {
            store,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    /// Check credentials and issue a bearer token
    pub fn login(&self, email: &str, password: &str) -> Result<(String, Claims), AuthError> {
        let role = self.store.check_password(email, password)?;
        let claims = Claims {
            email: email.to_string(),
            role,
            exp: (Utc::now() + self.token_ttl).timestamp() as usize,
        };
        let token = self.encode(&claims)?;

        info!(email, role = ?role, "Token issued");
        Ok((token, claims))
    }

    /// New accounts always get the `user` role
    pub fn register(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.store.insert(email, password, Role::User)?;
        info!(email, "User registered");
        Ok(())
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }

    pub fn users(&self) -> &UserStore {
        &self.store
    }

    fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(AuthError::TokenIssue)
    }
}
