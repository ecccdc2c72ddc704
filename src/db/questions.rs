use sea_orm::*;
use uuid::Uuid;

use crate::models::questions::{self, AnswerQuestion, AskQuestion};

/// Insert a new, unanswered question.
pub async fn insert_question(
    db: &DatabaseConnection,
    request_id: i32,
    provider_id: Uuid,
    input: &AskQuestion,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<questions::Model, DbErr> {
    let new_question = questions::ActiveModel {
        request_id: Set(request_id),
        provider_id: Set(provider_id),
        question: Set(input.question.clone()),
        answer: Set(None),
        created_at: Set(now),
        answered_at: Set(None),
        ..Default::default()
    };

    new_question.insert(db).await
}

/// Fetch a single question by ID.
pub async fn get_question_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<questions::Model>, DbErr> {
    questions::Entity::find_by_id(id).one(db).await
}

/// Fetch all questions on a request (owner view).
pub async fn get_questions_by_request_id(
    db: &DatabaseConnection,
    request_id: i32,
) -> Result<Vec<questions::Model>, DbErr> {
    questions::Entity::find()
        .filter(questions::Column::RequestId.eq(request_id))
        .order_by_asc(questions::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch the questions a specific provider asked on a request.
pub async fn get_questions_by_request_for_provider(
    db: &DatabaseConnection,
    request_id: i32,
    provider_id: Uuid,
) -> Result<Vec<questions::Model>, DbErr> {
    questions::Entity::find()
        .filter(questions::Column::RequestId.eq(request_id))
        .filter(questions::Column::ProviderId.eq(provider_id))
        .order_by_asc(questions::Column::CreatedAt)
        .all(db)
        .await
}

/// Record the owner's answer.
pub async fn answer_question(
    db: &DatabaseConnection,
    question: questions::Model,
    input: &AnswerQuestion,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<questions::Model, DbErr> {
    let mut active: questions::ActiveModel = question.into();
    active.answer = Set(Some(input.answer.clone()));
    active.answered_at = Set(Some(now));

    active.update(db).await
}
