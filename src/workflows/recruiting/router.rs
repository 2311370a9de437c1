use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    ApplicationId, CandidateId, DeleteInterviewRequest, InterviewId, InterviewPatch,
    InterviewRequest, InterviewStepId, PositionId, PositionPatch,
};
use super::interviews::{InterviewLifecycleService, InterviewServiceError};
use super::positions::{PositionServiceError, PositionUpdateService};
use super::reference::ReferenceError;
use super::repository::{AuditTrail, RecruitingStore};

/// Shared handler state bundling both services over one store.
pub struct RecruitingServices<S, A> {
    pub interviews: Arc<InterviewLifecycleService<S, A>>,
    pub positions: Arc<PositionUpdateService<S>>,
}

impl<S, A> Clone for RecruitingServices<S, A> {
    fn clone(&self) -> Self {
        Self {
            interviews: Arc::clone(&self.interviews),
            positions: Arc::clone(&self.positions),
        }
    }
}

/// Payload for moving an application to another interview step.
#[derive(Debug, Clone, Deserialize)]
pub struct StageAdvanceRequest {
    pub current_interview_step: InterviewStepId,
}

/// Router builder exposing the interview lifecycle and position update
/// endpoints.
pub fn recruiting_router<S, A>(services: RecruitingServices<S, A>) -> Router
where
    S: RecruitingStore + 'static,
    A: AuditTrail + 'static,
{
    Router::new()
        .route(
            "/api/v1/candidates/:candidate_id/interviews",
            post(create_interview_handler::<S, A>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/interviews/:interview_id",
            put(update_interview_handler::<S, A>)
                .delete(delete_interview_handler::<S, A>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/applications/:application_id/stage",
            put(advance_stage_handler::<S, A>),
        )
        .route(
            "/api/v1/positions/:position_id",
            put(update_position_handler::<S, A>),
        )
        .with_state(services)
}

pub(crate) async fn create_interview_handler<S, A>(
    State(services): State<RecruitingServices<S, A>>,
    Path(candidate_id): Path<i64>,
    axum::Json(request): axum::Json<InterviewRequest>,
) -> Response
where
    S: RecruitingStore + 'static,
    A: AuditTrail + 'static,
{
    match services
        .interviews
        .create(CandidateId(candidate_id), request)
    {
        Ok(interview) => (StatusCode::CREATED, axum::Json(interview)).into_response(),
        Err(err) => interview_error_response(err),
    }
}

pub(crate) async fn update_interview_handler<S, A>(
    State(services): State<RecruitingServices<S, A>>,
    Path((candidate_id, interview_id)): Path<(i64, i64)>,
    axum::Json(patch): axum::Json<InterviewPatch>,
) -> Response
where
    S: RecruitingStore + 'static,
    A: AuditTrail + 'static,
{
    match services.interviews.update(
        CandidateId(candidate_id),
        InterviewId(interview_id),
        patch,
    ) {
        Ok(interview) => (StatusCode::OK, axum::Json(interview)).into_response(),
        Err(err) => interview_error_response(err),
    }
}

pub(crate) async fn delete_interview_handler<S, A>(
    State(services): State<RecruitingServices<S, A>>,
    Path((candidate_id, interview_id)): Path<(i64, i64)>,
    body: Option<axum::Json<DeleteInterviewRequest>>,
) -> Response
where
    S: RecruitingStore + 'static,
    A: AuditTrail + 'static,
{
    let request = body.map(|axum::Json(inner)| inner).unwrap_or_default();

    match services.interviews.delete(
        CandidateId(candidate_id),
        InterviewId(interview_id),
        request,
    ) {
        Ok(interview) => (StatusCode::OK, axum::Json(interview)).into_response(),
        Err(err) => interview_error_response(err),
    }
}

pub(crate) async fn advance_stage_handler<S, A>(
    State(services): State<RecruitingServices<S, A>>,
    Path((candidate_id, application_id)): Path<(i64, i64)>,
    axum::Json(request): axum::Json<StageAdvanceRequest>,
) -> Response
where
    S: RecruitingStore + 'static,
    A: AuditTrail + 'static,
{
    match services.interviews.advance_stage(
        CandidateId(candidate_id),
        ApplicationId(application_id),
        request.current_interview_step,
    ) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(err) => interview_error_response(err),
    }
}

pub(crate) async fn update_position_handler<S, A>(
    State(services): State<RecruitingServices<S, A>>,
    Path(position_id): Path<i64>,
    axum::Json(patch): axum::Json<PositionPatch>,
) -> Response
where
    S: RecruitingStore + 'static,
    A: AuditTrail + 'static,
{
    match services.positions.update(PositionId(position_id), patch) {
        Ok(position) => (StatusCode::OK, axum::Json(position)).into_response(),
        Err(err) => position_error_response(err),
    }
}

fn interview_error_response(err: InterviewServiceError) -> Response {
    let status = match &err {
        InterviewServiceError::Reference(reference) => reference_status(reference),
        InterviewServiceError::CompletedInterviewImmutable { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        InterviewServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    error_response(status, err.to_string())
}

fn position_error_response(err: PositionServiceError) -> Response {
    let status = match &err {
        PositionServiceError::Field(_) => StatusCode::BAD_REQUEST,
        PositionServiceError::Reference(reference) => reference_status(reference),
        PositionServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    error_response(status, err.to_string())
}

fn reference_status(err: &ReferenceError) -> StatusCode {
    match err {
        ReferenceError::NotFound(_) => StatusCode::NOT_FOUND,
        ReferenceError::OwnershipMismatch { .. }
        | ReferenceError::FlowMismatch { .. }
        | ReferenceError::InactiveEmployee(_) => StatusCode::BAD_REQUEST,
        ReferenceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    let payload = json!({ "error": message });
    (status, axum::Json(payload)).into_response()
}
