use super::domain::{
    Application, ApplicationId, Candidate, CandidateId, Company, CompanyId, Employee, EmployeeId,
    Interview, InterviewFlow, InterviewFlowId, InterviewId, InterviewStep, InterviewStepId,
    Position, PositionId,
};
use super::repository::{RecruitingStore, RepositoryError};

/// Entity families referenced across the validation pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Candidate,
    Application,
    Position,
    Company,
    InterviewFlow,
    InterviewStep,
    Employee,
    Interview,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Candidate => "Candidate",
            Self::Application => "Application",
            Self::Position => "Position",
            Self::Company => "Company",
            Self::InterviewFlow => "Interview flow",
            Self::InterviewStep => "Interview step",
            Self::Employee => "Employee",
            Self::Interview => "Interview",
        }
    }
}

/// Typed failures raised while confirming foreign-key targets.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("{} not found", .0.label())]
    NotFound(EntityKind),
    #[error("application {} does not belong to candidate {}", application.0, candidate.0)]
    OwnershipMismatch {
        application: ApplicationId,
        candidate: CandidateId,
    },
    #[error("Interview step does not belong to the position's interview flow")]
    FlowMismatch {
        step: InterviewStepId,
        flow: InterviewFlowId,
    },
    #[error("Employee is not active")]
    InactiveEmployee(EmployeeId),
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

/// Each validator loads its target and either returns the entity or a typed
/// failure. Activity and parent-membership checks are explicit; callers
/// compose validators in the order their pipeline requires.
pub fn require_candidate<S: RecruitingStore + ?Sized>(
    store: &S,
    id: CandidateId,
) -> Result<Candidate, ReferenceError> {
    store
        .candidate(id)?
        .ok_or(ReferenceError::NotFound(EntityKind::Candidate))
}

pub fn require_application<S: RecruitingStore + ?Sized>(
    store: &S,
    id: ApplicationId,
) -> Result<Application, ReferenceError> {
    store
        .application(id)?
        .ok_or(ReferenceError::NotFound(EntityKind::Application))
}

/// Confirm the already-loaded application belongs to the claimed candidate.
pub fn require_application_owned_by(
    application: &Application,
    candidate: CandidateId,
) -> Result<(), ReferenceError> {
    if application.candidate_id != candidate {
        return Err(ReferenceError::OwnershipMismatch {
            application: application.id,
            candidate,
        });
    }
    Ok(())
}

pub fn require_position<S: RecruitingStore + ?Sized>(
    store: &S,
    id: PositionId,
) -> Result<Position, ReferenceError> {
    store
        .position(id)?
        .ok_or(ReferenceError::NotFound(EntityKind::Position))
}

pub fn require_company<S: RecruitingStore + ?Sized>(
    store: &S,
    id: CompanyId,
) -> Result<Company, ReferenceError> {
    store
        .company(id)?
        .ok_or(ReferenceError::NotFound(EntityKind::Company))
}

pub fn require_interview_flow<S: RecruitingStore + ?Sized>(
    store: &S,
    id: InterviewFlowId,
) -> Result<InterviewFlow, ReferenceError> {
    store
        .interview_flow(id)?
        .ok_or(ReferenceError::NotFound(EntityKind::InterviewFlow))
}

/// Load a step and confirm it belongs to the expected flow. A step that
/// exists under a different flow is a mismatch, never a substitution.
pub fn require_step_in_flow<S: RecruitingStore + ?Sized>(
    store: &S,
    step: InterviewStepId,
    flow: InterviewFlowId,
) -> Result<InterviewStep, ReferenceError> {
    let loaded = store
        .interview_step(step)?
        .ok_or(ReferenceError::NotFound(EntityKind::InterviewStep))?;

    if loaded.interview_flow_id != flow {
        return Err(ReferenceError::FlowMismatch { step, flow });
    }

    Ok(loaded)
}

pub fn require_active_employee<S: RecruitingStore + ?Sized>(
    store: &S,
    id: EmployeeId,
) -> Result<Employee, ReferenceError> {
    let employee = store
        .employee(id)?
        .ok_or(ReferenceError::NotFound(EntityKind::Employee))?;

    if !employee.is_active {
        return Err(ReferenceError::InactiveEmployee(id));
    }

    Ok(employee)
}

pub fn require_interview<S: RecruitingStore + ?Sized>(
    store: &S,
    id: InterviewId,
) -> Result<Interview, ReferenceError> {
    store
        .interview(id)?
        .ok_or(ReferenceError::NotFound(EntityKind::Interview))
}
