use std::sync::Arc;

use chrono::{Local, NaiveDate};

use super::domain::{Position, PositionId, PositionPatch};
use super::fields::{self, PositionFieldError};
use super::reference::{self, ReferenceError};
use super::repository::{RecruitingStore, RepositoryError};

/// Merge-and-validate pipeline for partial position updates.
///
/// Load, merge the sparse patch over the stored record, validate, confirm
/// repointed references, persist. No write happens before every check passes.
pub struct PositionUpdateService<S> {
    store: Arc<S>,
}

impl<S> PositionUpdateService<S>
where
    S: RecruitingStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Apply a partial update, evaluating date rules against the local date.
    pub fn update(
        &self,
        position_id: PositionId,
        patch: PositionPatch,
    ) -> Result<Position, PositionServiceError> {
        self.update_as_of(position_id, patch, Local::now().date_naive())
    }

    /// Apply a partial update with an explicit `today` for the
    /// application-deadline rule.
    pub fn update_as_of(
        &self,
        position_id: PositionId,
        patch: PositionPatch,
        today: NaiveDate,
    ) -> Result<Position, PositionServiceError> {
        let store = self.store.as_ref();

        let stored = reference::require_position(store, position_id)?;
        let merged = patch.apply_to(&stored);

        fields::validate(&patch, &merged, today)?;

        if let Some(company_id) = patch.company_id {
            reference::require_company(store, company_id)?;
        }

        if let Some(flow_id) = patch.interview_flow_id {
            reference::require_interview_flow(store, flow_id)?;
        }

        let persisted = self.store.update_position(merged)?;
        Ok(persisted)
    }
}

/// Error raised by the position update service.
#[derive(Debug, thiserror::Error)]
pub enum PositionServiceError {
    #[error(transparent)]
    Field(#[from] PositionFieldError),
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error(transparent)]
    Store(#[from] RepositoryError),
}
