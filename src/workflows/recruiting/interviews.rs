use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    Application, ApplicationId, CandidateId, DeleteInterviewRequest, Interview, InterviewDraft,
    InterviewId, InterviewPatch, InterviewRequest, InterviewResult, InterviewStepId,
};
use super::reference::{self, EntityKind, ReferenceError};
use super::repository::{AuditTrail, InterviewDeletionAudit, RecruitingStore, RepositoryError};

/// Orchestrates the interview lifecycle: `{none} -> Pending -> {Passed | Failed}`,
/// with deletion legal only before the interview completes.
///
/// Collaborators are injected per instance; there is no process-wide store
/// client. Every operation is a sequential validate-then-write pipeline with
/// exactly one persistence write on success.
pub struct InterviewLifecycleService<S, A> {
    store: Arc<S>,
    audit: Arc<A>,
}

impl<S, A> InterviewLifecycleService<S, A>
where
    S: RecruitingStore + 'static,
    A: AuditTrail + 'static,
{
    pub fn new(store: Arc<S>, audit: Arc<A>) -> Self {
        Self { store, audit }
    }

    /// Schedule a new interview for one of the candidate's applications.
    ///
    /// Validation order is fixed: candidate, application, ownership, position,
    /// step-in-flow, active employee. The persisted record comes back from the
    /// store with its generated identifier; `result` starts at `Pending`.
    pub fn create(
        &self,
        candidate_id: CandidateId,
        request: InterviewRequest,
    ) -> Result<Interview, InterviewServiceError> {
        let store = self.store.as_ref();

        reference::require_candidate(store, candidate_id)?;
        let application = reference::require_application(store, request.application_id)?;
        reference::require_application_owned_by(&application, candidate_id)?;
        let position = reference::require_position(store, application.position_id)?;
        reference::require_step_in_flow(
            store,
            request.interview_step_id,
            position.interview_flow_id,
        )?;
        reference::require_active_employee(store, request.employee_id)?;

        let draft = InterviewDraft {
            application_id: request.application_id,
            interview_step_id: request.interview_step_id,
            employee_id: request.employee_id,
            interview_date: request.interview_date,
            result: InterviewResult::Pending,
            score: request.score,
            notes: request.notes,
        };

        let stored = self.store.insert_interview(draft)?;
        Ok(stored)
    }

    /// Apply a field-level merge onto a stored interview.
    ///
    /// Step and employee references are re-validated only when the patch
    /// carries them. The stored `application_id` always survives, and a
    /// completed interview stays updatable; only deletion is gated on
    /// `result`.
    pub fn update(
        &self,
        candidate_id: CandidateId,
        interview_id: InterviewId,
        patch: InterviewPatch,
    ) -> Result<Interview, InterviewServiceError> {
        let store = self.store.as_ref();

        let stored = reference::require_interview(store, interview_id)?;
        let application = reference::require_application(store, stored.application_id)?;
        reference::require_application_owned_by(&application, candidate_id)?;

        if let Some(step_id) = patch.interview_step_id {
            let position = reference::require_position(store, application.position_id)?;
            reference::require_step_in_flow(store, step_id, position.interview_flow_id)?;
        }

        if let Some(employee_id) = patch.employee_id {
            reference::require_active_employee(store, employee_id)?;
        }

        let merged = patch.apply_to(&stored);
        let persisted = self.store.update_interview(merged)?;
        Ok(persisted)
    }

    /// Delete an interview that has not completed, returning the removed
    /// record.
    ///
    /// A `Passed` or `Failed` interview is immutable for deletion; the store's
    /// delete is never invoked for one. On success a deletion audit entry is
    /// recorded fire-and-forget: audit failures are logged and swallowed.
    pub fn delete(
        &self,
        candidate_id: CandidateId,
        interview_id: InterviewId,
        request: DeleteInterviewRequest,
    ) -> Result<Interview, InterviewServiceError> {
        let store = self.store.as_ref();

        reference::require_candidate(store, candidate_id)?;
        let stored = reference::require_interview(store, interview_id)?;
        let application = reference::require_application(store, stored.application_id)?;
        reference::require_application_owned_by(&application, candidate_id)?;

        if stored.result.is_completed() {
            return Err(InterviewServiceError::CompletedInterviewImmutable {
                interview: interview_id,
                result: stored.result,
            });
        }

        self.store.delete_interview(interview_id)?;

        let entry = InterviewDeletionAudit {
            interview_id,
            candidate_id,
            reason: request.reason,
            recorded_at: Utc::now(),
        };
        info!(
            interview_id = entry.interview_id.0,
            candidate_id = entry.candidate_id.0,
            reason = entry.reason.as_deref().unwrap_or("none given"),
            recorded_at = %entry.recorded_at,
            "interview deleted"
        );
        if let Err(err) = self.audit.record(entry) {
            warn!(
                interview_id = interview_id.0,
                error = %err,
                "interview deletion audit entry dropped"
            );
        }

        Ok(stored)
    }

    /// Move an application's current-step pointer to another step of the
    /// position's interview flow.
    pub fn advance_stage(
        &self,
        candidate_id: CandidateId,
        application_id: ApplicationId,
        step_id: InterviewStepId,
    ) -> Result<Application, InterviewServiceError> {
        let store = self.store.as_ref();

        let mut application = store
            .application_for_candidate(application_id, candidate_id)?
            .ok_or(ReferenceError::NotFound(EntityKind::Application))?;
        let position = reference::require_position(store, application.position_id)?;
        reference::require_step_in_flow(store, step_id, position.interview_flow_id)?;

        application.current_interview_step = step_id;
        let persisted = self.store.update_application(application)?;
        Ok(persisted)
    }
}

/// Error raised by the interview lifecycle service.
#[derive(Debug, thiserror::Error)]
pub enum InterviewServiceError {
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error("Completed interviews cannot be deleted")]
    CompletedInterviewImmutable {
        interview: InterviewId,
        result: InterviewResult,
    },
    #[error(transparent)]
    Store(#[from] RepositoryError),
}
