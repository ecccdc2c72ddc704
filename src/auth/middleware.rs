use actix_web::FromRequest;
use actix_web::{dev::Payload, web, Error, HttpRequest};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::auth::keys::KeyStore;
use crate::db::accounts::find_or_create_from_auth;
use crate::models::accounts::{self, CreateAccountFromAuth, Roles};

/// Extractor resolving the Bearer token to an `accounts` row.
///
/// The row doubles as the capability snapshot of the identity provider:
/// role, company size, rating and blocklist are read once here and treated
/// as valid for the duration of the request.
pub struct AuthenticatedAccount(pub accounts::Model);

impl FromRequest for AuthenticatedAccount {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    actix_web::error::ErrorUnauthorized("Missing Authorization header")
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
            })?;

            // 2. Validate the JWT against the provider's signing keys.
            let key_store = req.app_data::<web::Data<Arc<KeyStore>>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("Key store not configured")
            })?;

            let claims = key_store
                .validate(token)
                .await
                .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

            // 3. Extract account info from claims.
            let account_id = claims
                .account_id()
                .map_err(actix_web::error::ErrorUnauthorized)?;

            let email = claims
                .account_email()
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("No email in token claims"))?;

            // 4. Get the database connection.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("Database not configured")
                })?;

            // 5. Find or create the account.
            let account = find_or_create_from_auth(
                db.get_ref(),
                CreateAccountFromAuth {
                    id: account_id,
                    email,
                    display_name: claims.display_name(),
                    auth_provider: "google".to_string(),
                    role: Roles::Provider, // default role until the profile is completed
                },
            )
            .await
            .map_err(|e| {
                actix_web::error::ErrorInternalServerError(format!("Database error: {e}"))
            })?;

            Ok(AuthenticatedAccount(account))
        })
    }
}
