use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use super::domain::{
    Application, ApplicationId, Candidate, CandidateId, Company, CompanyId, Employee, EmployeeId,
    Interview, InterviewDraft, InterviewFlow, InterviewFlowId, InterviewId, InterviewStep,
    InterviewStepId, Position, PositionId, PositionStatus,
};
use super::repository::{
    AuditError, AuditTrail, InterviewDeletionAudit, RecruitingStore, RepositoryError,
};

/// Hash-map backed store used by the demo binary and the test suites.
#[derive(Default, Clone)]
pub struct InMemoryRecruitingStore {
    candidates: Arc<Mutex<HashMap<CandidateId, Candidate>>>,
    applications: Arc<Mutex<HashMap<ApplicationId, Application>>>,
    positions: Arc<Mutex<HashMap<PositionId, Position>>>,
    companies: Arc<Mutex<HashMap<CompanyId, Company>>>,
    flows: Arc<Mutex<HashMap<InterviewFlowId, InterviewFlow>>>,
    steps: Arc<Mutex<HashMap<InterviewStepId, InterviewStep>>>,
    employees: Arc<Mutex<HashMap<EmployeeId, Employee>>>,
    interviews: Arc<Mutex<HashMap<InterviewId, Interview>>>,
    interview_sequence: Arc<AtomicI64>,
}

impl InMemoryRecruitingStore {
    pub fn seed_candidate(&self, candidate: Candidate) {
        self.candidates
            .lock()
            .expect("store mutex poisoned")
            .insert(candidate.id, candidate);
    }

    pub fn seed_application(&self, application: Application) {
        self.applications
            .lock()
            .expect("store mutex poisoned")
            .insert(application.id, application);
    }

    pub fn seed_position(&self, position: Position) {
        self.positions
            .lock()
            .expect("store mutex poisoned")
            .insert(position.id, position);
    }

    pub fn seed_company(&self, company: Company) {
        self.companies
            .lock()
            .expect("store mutex poisoned")
            .insert(company.id, company);
    }

    pub fn seed_flow(&self, flow: InterviewFlow) {
        self.flows
            .lock()
            .expect("store mutex poisoned")
            .insert(flow.id, flow);
    }

    pub fn seed_step(&self, step: InterviewStep) {
        self.steps
            .lock()
            .expect("store mutex poisoned")
            .insert(step.id, step);
    }

    pub fn seed_employee(&self, employee: Employee) {
        self.employees
            .lock()
            .expect("store mutex poisoned")
            .insert(employee.id, employee);
    }

    pub fn seed_interview(&self, interview: Interview) {
        self.interview_sequence
            .fetch_max(interview.id.0, Ordering::Relaxed);
        self.interviews
            .lock()
            .expect("store mutex poisoned")
            .insert(interview.id, interview);
    }

    /// A store pre-populated with one company, one three-step flow, one open
    /// position, one candidate with an application, and two interviewers
    /// (one active, one deactivated).
    pub fn with_sample_data() -> Self {
        let store = Self::default();

        store.seed_company(Company {
            id: CompanyId(1),
            name: "Acme Analytics".to_string(),
        });

        store.seed_flow(InterviewFlow {
            id: InterviewFlowId(5),
            description: "Standard engineering loop".to_string(),
        });
        store.seed_step(InterviewStep {
            id: InterviewStepId(1),
            interview_flow_id: InterviewFlowId(5),
            name: "Initial Screening".to_string(),
            order_index: 1,
        });
        store.seed_step(InterviewStep {
            id: InterviewStepId(2),
            interview_flow_id: InterviewFlowId(5),
            name: "Technical Interview".to_string(),
            order_index: 2,
        });
        store.seed_step(InterviewStep {
            id: InterviewStepId(3),
            interview_flow_id: InterviewFlowId(5),
            name: "Manager Interview".to_string(),
            order_index: 3,
        });

        store.seed_position(Position {
            id: PositionId(10),
            company_id: CompanyId(1),
            interview_flow_id: InterviewFlowId(5),
            title: "Senior Backend Engineer".to_string(),
            description: "Own the ingestion services and their storage layer.".to_string(),
            status: PositionStatus::Open,
            is_visible: true,
            location: "Des Moines, IA".to_string(),
            job_description: "Design and run high-volume ingestion pipelines.".to_string(),
            requirements: Some("5+ years building networked services".to_string()),
            responsibilities: Some("Service ownership from design to on-call".to_string()),
            salary_min: Some(110_000.0),
            salary_max: Some(140_000.0),
            employment_type: Some("Full-time".to_string()),
            benefits: None,
            company_description: None,
            application_deadline: NaiveDate::from_ymd_opt(2026, 12, 31),
            contact_info: Some("recruiting@acme-analytics.example".to_string()),
        });

        store.seed_candidate(Candidate {
            id: CandidateId(1),
            first_name: "Jordan".to_string(),
            last_name: "Reyes".to_string(),
            email: "jordan.reyes@example.com".to_string(),
        });
        store.seed_application(Application {
            id: ApplicationId(1),
            candidate_id: CandidateId(1),
            position_id: PositionId(10),
            application_date: NaiveDate::from_ymd_opt(2026, 5, 4).expect("valid date"),
            current_interview_step: InterviewStepId(1),
            notes: None,
        });

        store.seed_employee(Employee {
            id: EmployeeId(3),
            company_id: CompanyId(1),
            name: "Alice Donnelly".to_string(),
            email: "alice.donnelly@acme-analytics.example".to_string(),
            is_active: true,
        });
        store.seed_employee(Employee {
            id: EmployeeId(4),
            company_id: CompanyId(1),
            name: "Marcus Webb".to_string(),
            email: "marcus.webb@acme-analytics.example".to_string(),
            is_active: false,
        });

        store
    }
}

impl RecruitingStore for InMemoryRecruitingStore {
    fn candidate(&self, id: CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        let guard = self.candidates.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn application(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.applications.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn application_for_candidate(
        &self,
        application: ApplicationId,
        candidate: CandidateId,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = self.applications.lock().expect("store mutex poisoned");
        Ok(guard
            .get(&application)
            .filter(|record| record.candidate_id == candidate)
            .cloned())
    }

    fn position(&self, id: PositionId) -> Result<Option<Position>, RepositoryError> {
        let guard = self.positions.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn company(&self, id: CompanyId) -> Result<Option<Company>, RepositoryError> {
        let guard = self.companies.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn interview_flow(
        &self,
        id: InterviewFlowId,
    ) -> Result<Option<InterviewFlow>, RepositoryError> {
        let guard = self.flows.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn interview_step(
        &self,
        id: InterviewStepId,
    ) -> Result<Option<InterviewStep>, RepositoryError> {
        let guard = self.steps.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn employee(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let guard = self.employees.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn interview(&self, id: InterviewId) -> Result<Option<Interview>, RepositoryError> {
        let guard = self.interviews.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn insert_interview(&self, draft: InterviewDraft) -> Result<Interview, RepositoryError> {
        let id = InterviewId(self.interview_sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let interview = draft.into_interview(id);
        let mut guard = self.interviews.lock().expect("store mutex poisoned");
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id, interview.clone());
        Ok(interview)
    }

    fn update_interview(&self, interview: Interview) -> Result<Interview, RepositoryError> {
        let mut guard = self.interviews.lock().expect("store mutex poisoned");
        if !guard.contains_key(&interview.id) {
            return Err(RepositoryError::Missing);
        }
        guard.insert(interview.id, interview.clone());
        Ok(interview)
    }

    fn delete_interview(&self, id: InterviewId) -> Result<(), RepositoryError> {
        let mut guard = self.interviews.lock().expect("store mutex poisoned");
        match guard.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::Missing),
        }
    }

    fn update_application(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.applications.lock().expect("store mutex poisoned");
        if !guard.contains_key(&application.id) {
            return Err(RepositoryError::Missing);
        }
        guard.insert(application.id, application.clone());
        Ok(application)
    }

    fn update_position(&self, position: Position) -> Result<Position, RepositoryError> {
        let mut guard = self.positions.lock().expect("store mutex poisoned");
        if !guard.contains_key(&position.id) {
            return Err(RepositoryError::Missing);
        }
        guard.insert(position.id, position.clone());
        Ok(position)
    }
}

/// Audit trail that keeps entries in memory so callers can assert on them.
#[derive(Default, Clone)]
pub struct RecordingAuditTrail {
    entries: Arc<Mutex<Vec<InterviewDeletionAudit>>>,
}

impl RecordingAuditTrail {
    pub fn entries(&self) -> Vec<InterviewDeletionAudit> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditTrail for RecordingAuditTrail {
    fn record(&self, entry: InterviewDeletionAudit) -> Result<(), AuditError> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .push(entry);
        Ok(())
    }
}
