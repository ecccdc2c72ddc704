use actix_web::{web, HttpResponse, Responder};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedAccount;
use crate::cache::{keys, CacheConfig, CacheData};
use crate::db::{questions as question_db, requests as request_db};
use crate::lifecycle::clock::ClockData;
use crate::lifecycle::events::SinkData;
use crate::lifecycle::{self, LifecycleError};
use crate::models::accounts::Roles;
use crate::models::questions::{self, AnswerQuestion, AskQuestion};

use super::error_response;

/// POST /api/requests/{id}/questions — a provider asks a question on an
/// open request.
pub async fn ask_question(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    clock: web::Data<ClockData>,
    sink: web::Data<SinkData>,
    cache: web::Data<CacheData>,
    path: web::Path<i32>,
    body: web::Json<AskQuestion>,
) -> impl Responder {
    let request_id = path.into_inner();

    match lifecycle::questions::ask(
        db.get_ref(),
        clock.get_ref().as_ref(),
        sink.get_ref().as_ref(),
        &account.0,
        request_id,
        body.into_inner(),
    )
    .await
    {
        Ok(question) => {
            let _ = cache.delete(&keys::request_questions(request_id)).await;
            HttpResponse::Created().json(question)
        }
        Err(e) => error_response(e),
    }
}

/// POST /api/questions/{id}/answer — the request owner answers a question.
pub async fn answer_question(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    clock: web::Data<ClockData>,
    sink: web::Data<SinkData>,
    cache: web::Data<CacheData>,
    path: web::Path<i32>,
    body: web::Json<AnswerQuestion>,
) -> impl Responder {
    match lifecycle::questions::answer(
        db.get_ref(),
        clock.get_ref().as_ref(),
        sink.get_ref().as_ref(),
        &account.0,
        path.into_inner(),
        body.into_inner(),
    )
    .await
    {
        Ok(question) => {
            let _ = cache.delete(&keys::request_questions(question.request_id)).await;
            HttpResponse::Ok().json(question)
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/requests/{id}/questions — the Q&A thread of a request.
///
/// The owner (and admins) see everything, served through the cache;
/// a provider sees only the questions they asked.
pub async fn get_questions(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    cache_config: web::Data<CacheConfig>,
    path: web::Path<i32>,
) -> impl Responder {
    let request_id = path.into_inner();
    let db = db.get_ref();

    let request = match request_db::get_request_by_id(db, request_id).await {
        Ok(Some(request)) => request,
        Ok(None) => return error_response(LifecycleError::not_found("Request", request_id)),
        Err(e) => return error_response(e.into()),
    };

    let is_owner = request.owner_id == account.0.id || account.0.role == Roles::Admin;
    if !is_owner {
        return match question_db::get_questions_by_request_for_provider(
            db,
            request_id,
            account.0.id,
        )
        .await
        {
            Ok(list) => HttpResponse::Ok().json(list),
            Err(e) => error_response(e.into()),
        };
    }

    let cache_key = keys::request_questions(request_id);
    if let Ok(Some(cached)) = cache.get::<Vec<questions::Model>>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match question_db::get_questions_by_request_id(db, request_id).await {
        Ok(list) => {
            let ttl = cache_config.question_ttl.as_secs();
            let _ = cache.set(&cache_key, &list, Some(ttl)).await;
            HttpResponse::Ok().json(list)
        }
        Err(e) => error_response(e.into()),
    }
}
