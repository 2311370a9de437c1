use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    Application, ApplicationId, Candidate, CandidateId, Company, CompanyId, Employee, EmployeeId,
    Interview, InterviewDraft, InterviewFlow, InterviewFlowId, InterviewId, InterviewStep,
    InterviewStepId, Position, PositionId,
};

/// Storage abstraction over the relational backing store so the services can
/// be exercised in isolation.
///
/// The store provides no optimistic-concurrency token: two concurrent updates
/// to the same interview or position race with last-write-wins semantics.
pub trait RecruitingStore: Send + Sync {
    fn candidate(&self, id: CandidateId) -> Result<Option<Candidate>, RepositoryError>;
    fn application(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError>;
    /// Lookup for the stage-progression path: the application only if it
    /// exists *and* belongs to the candidate.
    fn application_for_candidate(
        &self,
        application: ApplicationId,
        candidate: CandidateId,
    ) -> Result<Option<Application>, RepositoryError>;
    fn position(&self, id: PositionId) -> Result<Option<Position>, RepositoryError>;
    fn company(&self, id: CompanyId) -> Result<Option<Company>, RepositoryError>;
    fn interview_flow(&self, id: InterviewFlowId) -> Result<Option<InterviewFlow>, RepositoryError>;
    fn interview_step(&self, id: InterviewStepId) -> Result<Option<InterviewStep>, RepositoryError>;
    fn employee(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError>;
    fn interview(&self, id: InterviewId) -> Result<Option<Interview>, RepositoryError>;

    /// Insert a new interview, assigning its identifier.
    fn insert_interview(&self, draft: InterviewDraft) -> Result<Interview, RepositoryError>;
    fn update_interview(&self, interview: Interview) -> Result<Interview, RepositoryError>;
    fn delete_interview(&self, id: InterviewId) -> Result<(), RepositoryError>;
    fn update_application(&self, application: Application) -> Result<Application, RepositoryError>;
    fn update_position(&self, position: Position) -> Result<Position, RepositoryError>;
}

/// Error enumeration for store failures. Propagated verbatim, never swallowed.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    Missing,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Trail entry emitted after an interview deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewDeletionAudit {
    pub interview_id: InterviewId,
    pub candidate_id: CandidateId,
    pub reason: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Outbound audit hook. Deletion audits are fire-and-forget: the lifecycle
/// service logs and swallows failures rather than rolling anything back.
pub trait AuditTrail: Send + Sync {
    fn record(&self, entry: InterviewDeletionAudit) -> Result<(), AuditError>;
}

/// Audit dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit transport unavailable: {0}")]
    Transport(String),
}
