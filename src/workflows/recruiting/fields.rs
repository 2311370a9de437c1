use chrono::NaiveDate;

use super::domain::{Position, PositionPatch};

const MAX_TITLE_LEN: usize = 100;

/// Malformed or out-of-range fields on a position update.
#[derive(Debug, thiserror::Error)]
pub enum PositionFieldError {
    #[error("{0} must be a non-empty string")]
    EmptyText(&'static str),
    #[error("title must be {MAX_TITLE_LEN} characters or fewer (found {length})")]
    TitleTooLong { length: usize },
    #[error("{0} must be a positive integer")]
    NonPositiveReference(&'static str),
    #[error("{field} must be zero or greater")]
    NegativeSalary { field: &'static str, value: f64 },
    #[error("salaryMin cannot exceed salaryMax (found {min} > {max})")]
    SalaryRange { min: f64, max: f64 },
    #[error("applicationDeadline {deadline} must not be before today")]
    DeadlinePassed { deadline: NaiveDate },
}

/// Validate a position patch field by field, in a fixed order, stopping at
/// the first failure. Fields absent from the patch are not checked; the
/// salary band cross-check is the one cross-field rule and runs against the
/// merged view so a patch can never leave `salary_min > salary_max` behind.
pub fn validate(
    patch: &PositionPatch,
    merged: &Position,
    today: NaiveDate,
) -> Result<(), PositionFieldError> {
    if let Some(title) = &patch.title {
        require_text("title", title)?;
        let length = title.trim().chars().count();
        if length > MAX_TITLE_LEN {
            return Err(PositionFieldError::TitleTooLong { length });
        }
    }

    if let Some(description) = &patch.description {
        require_text("description", description)?;
    }

    if let Some(location) = &patch.location {
        require_text("location", location)?;
    }

    if let Some(job_description) = &patch.job_description {
        require_text("jobDescription", job_description)?;
    }

    if let Some(company_id) = patch.company_id {
        if company_id.0 <= 0 {
            return Err(PositionFieldError::NonPositiveReference("companyId"));
        }
    }

    if let Some(flow_id) = patch.interview_flow_id {
        if flow_id.0 <= 0 {
            return Err(PositionFieldError::NonPositiveReference("interviewFlowId"));
        }
    }

    if let Some(min) = patch.salary_min {
        require_salary("salaryMin", min)?;
    }

    if let Some(max) = patch.salary_max {
        require_salary("salaryMax", max)?;
    }

    if let (Some(min), Some(max)) = (merged.salary_min, merged.salary_max) {
        if min > max {
            return Err(PositionFieldError::SalaryRange { min, max });
        }
    }

    if let Some(deadline) = patch.application_deadline {
        if deadline < today {
            return Err(PositionFieldError::DeadlinePassed { deadline });
        }
    }

    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<(), PositionFieldError> {
    if value.trim().is_empty() {
        return Err(PositionFieldError::EmptyText(field));
    }
    Ok(())
}

fn require_salary(field: &'static str, value: f64) -> Result<(), PositionFieldError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PositionFieldError::NegativeSalary { field, value });
    }
    Ok(())
}
