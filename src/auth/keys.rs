use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use moka::future::Cache;
use thiserror::Error;
use tracing::debug;

use super::token::Claims;

const JWKS_URL_TEMPLATE: &str = "https://{}.supabase.co/auth/v1/.well-known/jwks.json";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing 'kid' in token header")]
    MissingKeyId,
    #[error("failed to fetch JWKS: {0}")]
    KeyFetch(String),
    #[error("signing key {0} not present in JWKS")]
    UnknownKey(String),
    #[error("token rejected: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

#[derive(Clone)]
struct JwkKey {
    x: String,
    y: String,
    algorithm: Algorithm,
}

/// Fetches and caches the identity provider's JWKS signing keys, and
/// validates incoming tokens against them. Keys rotate rarely; a one-hour
/// TTL keeps validation off the network on the hot path.
#[derive(Clone)]
pub struct KeyStore {
    cache: Cache<String, JwkKey>,
    jwks_url: String,
    client: reqwest::Client,
    anon_key: String,
}

impl KeyStore {
    pub fn new(project_ref: &str, anon_key: &str) -> Self {
        let cache = Cache::builder()
            .time_to_live(std::time::Duration::from_secs(3600))
            .max_capacity(10)
            .build();

        Self {
            cache,
            jwks_url: JWKS_URL_TEMPLATE.replace("{}", project_ref),
            client: reqwest::Client::new(),
            anon_key: anon_key.to_string(),
        }
    }

    /// Validate a token's signature and expiry, returning its claims.
    pub async fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)?;
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        let key = self.key(&kid).await?;
        let decoding_key = DecodingKey::from_ec_components(&key.x, &key.y)?;

        let mut validation = Validation::new(key.algorithm);
        validation.validate_aud = false;

        let data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(data.claims)
    }

    async fn key(&self, kid: &str) -> Result<JwkKey, AuthError> {
        if let Some(cached) = self.cache.get(kid).await {
            return Ok(cached);
        }

        let jwks = self.fetch_jwks().await?;
        let keys = jwks["keys"]
            .as_array()
            .ok_or_else(|| AuthError::KeyFetch("no keys in JWKS document".to_string()))?;

        let entry = keys
            .iter()
            .find(|k| k["kid"].as_str() == Some(kid))
            .ok_or_else(|| AuthError::UnknownKey(kid.to_string()))?;

        let x = entry["x"]
            .as_str()
            .ok_or_else(|| AuthError::KeyFetch("missing 'x' in JWK".to_string()))?
            .to_string();
        let y = entry["y"]
            .as_str()
            .ok_or_else(|| AuthError::KeyFetch("missing 'y' in JWK".to_string()))?
            .to_string();
        let algorithm = match entry["alg"].as_str().unwrap_or("ES256") {
            "ES384" => Algorithm::ES384,
            _ => Algorithm::ES256,
        };

        let key = JwkKey { x, y, algorithm };
        self.cache.insert(kid.to_string(), key.clone()).await;
        Ok(key)
    }

    async fn fetch_jwks(&self) -> Result<serde_json::Value, AuthError> {
        debug!("Fetching JWKS from {}", self.jwks_url);

        let response = self
            .client
            .get(&self.jwks_url)
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::KeyFetch(format!("HTTP {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| AuthError::KeyFetch(e.to_string()))
    }
}
