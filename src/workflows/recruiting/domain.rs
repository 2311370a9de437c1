use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub i64);

/// Identifier wrapper for candidate/position applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub i64);

/// Identifier wrapper for advertised positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionId(pub i64);

/// Identifier wrapper for hiring companies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub i64);

/// Identifier wrapper for interview flow templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterviewFlowId(pub i64);

/// Identifier wrapper for steps within an interview flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterviewStepId(pub i64);

/// Identifier wrapper for interviewer employees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub i64);

/// Identifier wrapper for scheduled interviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterviewId(pub i64);

/// A person applying to positions. Read-only within the interview lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Association between one candidate and one position, tracking stage progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub candidate_id: CandidateId,
    pub position_id: PositionId,
    pub application_date: NaiveDate,
    pub current_interview_step: InterviewStepId,
    pub notes: Option<String>,
}

/// Publication status of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionStatus {
    Open,
    Contratado,
    Cerrado,
    Borrador,
}

impl PositionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Contratado => "Contratado",
            Self::Cerrado => "Cerrado",
            Self::Borrador => "Borrador",
        }
    }
}

/// An advertised opening, owning a reference to one interview flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub company_id: CompanyId,
    pub interview_flow_id: InterviewFlowId,
    pub title: String,
    pub description: String,
    pub status: PositionStatus,
    pub is_visible: bool,
    pub location: String,
    pub job_description: String,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub employment_type: Option<String>,
    pub benefits: Option<String>,
    pub company_description: Option<String>,
    pub application_deadline: Option<NaiveDate>,
    pub contact_info: Option<String>,
}

/// Hiring company. Existence-checked when a position is repointed at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
}

/// Ordered template of interview steps assigned to positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewFlow {
    pub id: InterviewFlowId,
    pub description: String,
}

/// One stage within an interview flow. Belongs to exactly one flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewStep {
    pub id: InterviewStepId,
    pub interview_flow_id: InterviewFlowId,
    pub name: String,
    pub order_index: u32,
}

/// Interviewer. `is_active` gates eligibility for new or updated assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub company_id: CompanyId,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}

/// Outcome state of an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewResult {
    Pending,
    Passed,
    Failed,
}

impl Default for InterviewResult {
    fn default() -> Self {
        Self::Pending
    }
}

impl InterviewResult {
    /// Passed and Failed interviews are terminal and closed for deletion.
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Passed | Self::Failed)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Passed => "Passed",
            Self::Failed => "Failed",
        }
    }
}

/// A scheduled or completed meeting between an employee and a candidate for
/// one application at one interview step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: InterviewId,
    pub application_id: ApplicationId,
    pub interview_step_id: InterviewStepId,
    pub employee_id: EmployeeId,
    pub interview_date: NaiveDate,
    pub result: InterviewResult,
    pub score: Option<i32>,
    pub notes: Option<String>,
}

/// Interview awaiting its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewDraft {
    pub application_id: ApplicationId,
    pub interview_step_id: InterviewStepId,
    pub employee_id: EmployeeId,
    pub interview_date: NaiveDate,
    pub result: InterviewResult,
    pub score: Option<i32>,
    pub notes: Option<String>,
}

impl InterviewDraft {
    /// Attach the identifier assigned by the store.
    pub fn into_interview(self, id: InterviewId) -> Interview {
        Interview {
            id,
            application_id: self.application_id,
            interview_step_id: self.interview_step_id,
            employee_id: self.employee_id,
            interview_date: self.interview_date,
            result: self.result,
            score: self.score,
            notes: self.notes,
        }
    }
}

/// Payload for scheduling a new interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRequest {
    pub application_id: ApplicationId,
    pub interview_step_id: InterviewStepId,
    pub employee_id: EmployeeId,
    pub interview_date: NaiveDate,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Sparse field set for interview updates. Absent fields keep stored values;
/// `application_id` is fixed at creation and never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewPatch {
    #[serde(default)]
    pub application_id: Option<ApplicationId>,
    #[serde(default)]
    pub interview_step_id: Option<InterviewStepId>,
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub interview_date: Option<NaiveDate>,
    #[serde(default)]
    pub result: Option<InterviewResult>,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InterviewPatch {
    /// Merge onto a stored interview. The stored `id` and `application_id`
    /// survive regardless of what the patch carries.
    pub fn apply_to(&self, stored: &Interview) -> Interview {
        Interview {
            id: stored.id,
            application_id: stored.application_id,
            interview_step_id: self.interview_step_id.unwrap_or(stored.interview_step_id),
            employee_id: self.employee_id.unwrap_or(stored.employee_id),
            interview_date: self.interview_date.unwrap_or(stored.interview_date),
            result: self.result.unwrap_or(stored.result),
            score: self.score.or(stored.score),
            notes: self.notes.clone().or_else(|| stored.notes.clone()),
        }
    }
}

/// Payload accompanying an interview deletion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteInterviewRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Sparse field set for position updates. Present fields overwrite, omitted
/// fields keep prior values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionPatch {
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub interview_flow_id: Option<InterviewFlowId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<PositionStatus>,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub responsibilities: Option<String>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub company_description: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub contact_info: Option<String>,
}

impl PositionPatch {
    /// Shallow merge onto a stored position. The stored `id` always wins.
    pub fn apply_to(&self, stored: &Position) -> Position {
        Position {
            id: stored.id,
            company_id: self.company_id.unwrap_or(stored.company_id),
            interview_flow_id: self.interview_flow_id.unwrap_or(stored.interview_flow_id),
            title: self.title.clone().unwrap_or_else(|| stored.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| stored.description.clone()),
            status: self.status.unwrap_or(stored.status),
            is_visible: self.is_visible.unwrap_or(stored.is_visible),
            location: self
                .location
                .clone()
                .unwrap_or_else(|| stored.location.clone()),
            job_description: self
                .job_description
                .clone()
                .unwrap_or_else(|| stored.job_description.clone()),
            requirements: self
                .requirements
                .clone()
                .or_else(|| stored.requirements.clone()),
            responsibilities: self
                .responsibilities
                .clone()
                .or_else(|| stored.responsibilities.clone()),
            salary_min: self.salary_min.or(stored.salary_min),
            salary_max: self.salary_max.or(stored.salary_max),
            employment_type: self
                .employment_type
                .clone()
                .or_else(|| stored.employment_type.clone()),
            benefits: self.benefits.clone().or_else(|| stored.benefits.clone()),
            company_description: self
                .company_description
                .clone()
                .or_else(|| stored.company_description.clone()),
            application_deadline: self.application_deadline.or(stored.application_deadline),
            contact_info: self
                .contact_info
                .clone()
                .or_else(|| stored.contact_info.clone()),
        }
    }
}
