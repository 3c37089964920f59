//! HS256 JWT implementation of the `TokenAuthority` port.
//!
//! Tokens carry the account id, email, name, and role so the API layer
//! can gate admin routes without an extra lookup on every request.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::models::{Role, User};
use domains::ports::{AuthClaims, TokenAuthority};
use domains::{DomainError, DomainResult};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(rename = "_id")]
    id: Uuid,
    email: String,
    name: String,
    role: Role,
    exp: i64,
}

pub struct JwtAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtAuthority {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(ttl_secs),
        }
    }
}

impl TokenAuthority for JwtAuthority {
    fn issue(&self, user: &User) -> DomainResult<String> {
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(DomainError::internal)
    }

    fn verify(&self, token: &str) -> DomainResult<AuthClaims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|err| {
                tracing::debug!("token rejected: {err}");
                DomainError::Unauthorized("Invalid access token".into())
            })?;
        Ok(AuthClaims {
            user_id: data.claims.id,
            email: data.claims.email,
            name: data.claims.name,
            role: data.claims.role,
            expires_at: data.claims.exp,
        })
    }
}
