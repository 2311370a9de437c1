use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::recruiting::domain::{
    Application, ApplicationId, Candidate, CandidateId, Company, CompanyId, Employee, EmployeeId,
    Interview, InterviewDraft, InterviewFlow, InterviewFlowId, InterviewId, InterviewRequest,
    InterviewResult, InterviewStep, InterviewStepId, Position, PositionId,
};
use crate::workflows::recruiting::interviews::InterviewLifecycleService;
use crate::workflows::recruiting::memory::{InMemoryRecruitingStore, RecordingAuditTrail};
use crate::workflows::recruiting::positions::PositionUpdateService;
use crate::workflows::recruiting::repository::{
    AuditError, AuditTrail, InterviewDeletionAudit, RecruitingStore, RepositoryError,
};
use crate::workflows::recruiting::router::{recruiting_router, RecruitingServices};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2026, 6, 1)
}

/// Seeded store: candidate 1 applied (application 1) to position 10, which
/// uses flow 5 with steps 1..=3; employee 3 is active, employee 4 is not.
pub(super) fn sample_store() -> InMemoryRecruitingStore {
    InMemoryRecruitingStore::with_sample_data()
}

pub(super) fn interview_request() -> InterviewRequest {
    InterviewRequest {
        application_id: ApplicationId(1),
        interview_step_id: InterviewStepId(2),
        employee_id: EmployeeId(3),
        interview_date: date(2026, 6, 15),
        score: None,
        notes: None,
    }
}

/// A candidate with no claim on application 1.
pub(super) fn seed_rival_candidate(store: &InMemoryRecruitingStore) -> CandidateId {
    let id = CandidateId(2);
    store.seed_candidate(Candidate {
        id,
        first_name: "Priya".to_string(),
        last_name: "Natarajan".to_string(),
        email: "priya.natarajan@example.com".to_string(),
    });
    id
}

/// A step that belongs to a different interview flow than position 10 uses.
pub(super) fn seed_foreign_step(store: &InMemoryRecruitingStore) -> InterviewStepId {
    store.seed_flow(InterviewFlow {
        id: InterviewFlowId(6),
        description: "Executive loop".to_string(),
    });
    let id = InterviewStepId(9);
    store.seed_step(InterviewStep {
        id,
        interview_flow_id: InterviewFlowId(6),
        name: "Board Interview".to_string(),
        order_index: 1,
    });
    id
}

pub(super) fn seed_interview(
    store: &InMemoryRecruitingStore,
    id: i64,
    result: InterviewResult,
) -> InterviewId {
    let interview_id = InterviewId(id);
    store.seed_interview(Interview {
        id: interview_id,
        application_id: ApplicationId(1),
        interview_step_id: InterviewStepId(2),
        employee_id: EmployeeId(3),
        interview_date: date(2026, 6, 10),
        result,
        score: None,
        notes: None,
    });
    interview_id
}

pub(super) type Lifecycle = InterviewLifecycleService<InMemoryRecruitingStore, RecordingAuditTrail>;

pub(super) fn build_lifecycle() -> (Lifecycle, InMemoryRecruitingStore, RecordingAuditTrail) {
    let store = sample_store();
    let audit = RecordingAuditTrail::default();
    let service =
        InterviewLifecycleService::new(Arc::new(store.clone()), Arc::new(audit.clone()));
    (service, store, audit)
}

pub(super) fn build_positions() -> (
    PositionUpdateService<InMemoryRecruitingStore>,
    InMemoryRecruitingStore,
) {
    let store = sample_store();
    let service = PositionUpdateService::new(Arc::new(store.clone()));
    (service, store)
}

pub(super) fn stored_position(store: &InMemoryRecruitingStore) -> Position {
    store
        .position(PositionId(10))
        .expect("store reachable")
        .expect("position seeded")
}

pub(super) fn stored_application(store: &InMemoryRecruitingStore) -> Application {
    store
        .application(ApplicationId(1))
        .expect("store reachable")
        .expect("application seeded")
}

pub(super) fn build_router() -> (axum::Router, InMemoryRecruitingStore, RecordingAuditTrail) {
    let (_, store, audit) = build_lifecycle();
    let router = recruiting_router(services_over(store.clone(), audit.clone()));
    (router, store, audit)
}

pub(super) fn services_over(
    store: InMemoryRecruitingStore,
    audit: RecordingAuditTrail,
) -> RecruitingServices<InMemoryRecruitingStore, RecordingAuditTrail> {
    let store = Arc::new(store);
    RecruitingServices {
        interviews: Arc::new(InterviewLifecycleService::new(
            Arc::clone(&store),
            Arc::new(audit),
        )),
        positions: Arc::new(PositionUpdateService::new(store)),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Store whose every operation fails, for persistence-propagation tests.
pub(super) struct UnavailableStore;

impl UnavailableStore {
    fn error() -> RepositoryError {
        RepositoryError::Unavailable("database offline".to_string())
    }
}

impl RecruitingStore for UnavailableStore {
    fn candidate(&self, _id: CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        Err(Self::error())
    }

    fn application(&self, _id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(Self::error())
    }

    fn application_for_candidate(
        &self,
        _application: ApplicationId,
        _candidate: CandidateId,
    ) -> Result<Option<Application>, RepositoryError> {
        Err(Self::error())
    }

    fn position(&self, _id: PositionId) -> Result<Option<Position>, RepositoryError> {
        Err(Self::error())
    }

    fn company(&self, _id: CompanyId) -> Result<Option<Company>, RepositoryError> {
        Err(Self::error())
    }

    fn interview_flow(
        &self,
        _id: InterviewFlowId,
    ) -> Result<Option<InterviewFlow>, RepositoryError> {
        Err(Self::error())
    }

    fn interview_step(
        &self,
        _id: InterviewStepId,
    ) -> Result<Option<InterviewStep>, RepositoryError> {
        Err(Self::error())
    }

    fn employee(&self, _id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Err(Self::error())
    }

    fn interview(&self, _id: InterviewId) -> Result<Option<Interview>, RepositoryError> {
        Err(Self::error())
    }

    fn insert_interview(&self, _draft: InterviewDraft) -> Result<Interview, RepositoryError> {
        Err(Self::error())
    }

    fn update_interview(&self, _interview: Interview) -> Result<Interview, RepositoryError> {
        Err(Self::error())
    }

    fn delete_interview(&self, _id: InterviewId) -> Result<(), RepositoryError> {
        Err(Self::error())
    }

    fn update_application(
        &self,
        _application: Application,
    ) -> Result<Application, RepositoryError> {
        Err(Self::error())
    }

    fn update_position(&self, _position: Position) -> Result<Position, RepositoryError> {
        Err(Self::error())
    }
}

/// Audit trail that always rejects, for the fire-and-forget contract.
pub(super) struct FailingAuditTrail;

impl AuditTrail for FailingAuditTrail {
    fn record(&self, _entry: InterviewDeletionAudit) -> Result<(), AuditError> {
        Err(AuditError::Transport("audit sink offline".to_string()))
    }
}
