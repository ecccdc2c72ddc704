use sea_orm::DatabaseConnection;

use crate::db::{questions as question_db, requests as request_db};
use crate::lifecycle::clock::Clock;
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::events::{EventType, LifecycleEvent, NotificationSink};
use crate::models::accounts::{self, Roles};
use crate::models::questions::{self, AnswerQuestion, AskQuestion};
use crate::models::requests::RequestState;

/// A provider asks a question on an open request.
pub async fn ask(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    sink: &dyn NotificationSink,
    provider: &accounts::Model,
    request_id: i32,
    input: AskQuestion,
) -> Result<questions::Model, LifecycleError> {
    if provider.role != Roles::Provider {
        return Err(LifecycleError::Unauthorized(
            "Only providers can ask questions".to_string(),
        ));
    }
    if input.question.trim().is_empty() {
        return Err(LifecycleError::InvalidState(
            "A question cannot be empty".to_string(),
        ));
    }

    let request = request_db::get_request_by_id(db, request_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("Request", request_id))?;
    let request = super::requests::evaluate_deadline(db, clock, sink, request).await?;

    if request.state != RequestState::Pending {
        return Err(LifecycleError::InvalidState(format!(
            "Request {} is no longer open for questions",
            request.id
        )));
    }

    let question =
        question_db::insert_question(db, request.id, provider.id, &input, clock.now()).await?;

    sink.publish(LifecycleEvent::new(
        request.id,
        EventType::QuestionAsked,
        clock.now(),
        vec![question.id],
    ));

    Ok(question)
}

/// The request owner answers a question. Answering twice is `InvalidState`.
pub async fn answer(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    sink: &dyn NotificationSink,
    caller: &accounts::Model,
    question_id: i32,
    input: AnswerQuestion,
) -> Result<questions::Model, LifecycleError> {
    if input.answer.trim().is_empty() {
        return Err(LifecycleError::InvalidState(
            "An answer cannot be empty".to_string(),
        ));
    }

    let question = question_db::get_question_by_id(db, question_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("Question", question_id))?;
    let request = request_db::get_request_by_id(db, question.request_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("Request", question.request_id))?;

    if request.owner_id != caller.id {
        return Err(LifecycleError::Unauthorized(
            "Only the request owner can answer questions".to_string(),
        ));
    }
    if question.answer.is_some() {
        return Err(LifecycleError::InvalidState(format!(
            "Question {question_id} is already answered"
        )));
    }

    let answered = question_db::answer_question(db, question, &input, clock.now()).await?;

    sink.publish(LifecycleEvent::new(
        request.id,
        EventType::QuestionAnswered,
        clock.now(),
        vec![answered.id],
    ));

    Ok(answered)
}
