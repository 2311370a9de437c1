use std::sync::Arc;

use super::common::*;
use crate::workflows::recruiting::domain::{
    ApplicationId, CandidateId, DeleteInterviewRequest, EmployeeId, InterviewId, InterviewPatch,
    InterviewResult, InterviewStepId,
};
use crate::workflows::recruiting::interviews::{
    InterviewLifecycleService, InterviewServiceError,
};
use crate::workflows::recruiting::memory::RecordingAuditTrail;
use crate::workflows::recruiting::reference::{EntityKind, ReferenceError};
use crate::workflows::recruiting::repository::{RecruitingStore, RepositoryError};

#[test]
fn create_defaults_result_score_and_notes() {
    let (service, store, _) = build_lifecycle();

    let interview = service
        .create(CandidateId(1), interview_request())
        .expect("all references resolve");

    assert_eq!(interview.result, InterviewResult::Pending);
    assert_eq!(interview.score, None);
    assert_eq!(interview.notes, None);
    assert_eq!(interview.application_id, ApplicationId(1));

    let persisted = store
        .interview(interview.id)
        .expect("store reachable")
        .expect("interview persisted");
    assert_eq!(persisted, interview);
}

#[test]
fn create_rejects_unknown_candidate() {
    let (service, store, _) = build_lifecycle();

    match service.create(CandidateId(404), interview_request()) {
        Err(InterviewServiceError::Reference(err @ ReferenceError::NotFound(
            EntityKind::Candidate,
        ))) => {
            assert_eq!(err.to_string(), "Candidate not found");
        }
        other => panic!("expected missing candidate, got {other:?}"),
    }

    // Validation failed before the write: nothing was inserted.
    assert!(store
        .interview(InterviewId(1))
        .expect("store reachable")
        .is_none());
}

#[test]
fn create_rejects_unknown_application() {
    let (service, _, _) = build_lifecycle();
    let mut request = interview_request();
    request.application_id = ApplicationId(404);

    match service.create(CandidateId(1), request) {
        Err(InterviewServiceError::Reference(ReferenceError::NotFound(
            EntityKind::Application,
        ))) => {}
        other => panic!("expected missing application, got {other:?}"),
    }
}

#[test]
fn create_rejects_applications_of_other_candidates() {
    let (service, store, _) = build_lifecycle();
    let rival = seed_rival_candidate(&store);

    match service.create(rival, interview_request()) {
        Err(InterviewServiceError::Reference(ReferenceError::OwnershipMismatch {
            application: ApplicationId(1),
            candidate,
        })) => assert_eq!(candidate, rival),
        other => panic!("expected ownership mismatch, got {other:?}"),
    }
}

#[test]
fn create_rejects_steps_outside_the_positions_flow() {
    let (service, store, _) = build_lifecycle();
    let foreign = seed_foreign_step(&store);
    let mut request = interview_request();
    request.interview_step_id = foreign;

    match service.create(CandidateId(1), request) {
        Err(InterviewServiceError::Reference(err @ ReferenceError::FlowMismatch { .. })) => {
            assert_eq!(
                err.to_string(),
                "Interview step does not belong to the position's interview flow"
            );
        }
        other => panic!("expected flow mismatch, got {other:?}"),
    }
}

#[test]
fn create_rejects_inactive_interviewers() {
    let (service, _, _) = build_lifecycle();
    let mut request = interview_request();
    request.employee_id = EmployeeId(4);

    match service.create(CandidateId(1), request) {
        Err(InterviewServiceError::Reference(err @ ReferenceError::InactiveEmployee(_))) => {
            assert_eq!(err.to_string(), "Employee is not active");
        }
        other => panic!("expected inactive employee, got {other:?}"),
    }
}

#[test]
fn create_propagates_store_failures() {
    let service = InterviewLifecycleService::new(
        Arc::new(UnavailableStore),
        Arc::new(RecordingAuditTrail::default()),
    );

    match service.create(CandidateId(1), interview_request()) {
        Err(InterviewServiceError::Reference(ReferenceError::Store(
            RepositoryError::Unavailable(message),
        ))) => assert_eq!(message, "database offline"),
        other => panic!("expected store failure, got {other:?}"),
    }
}

#[test]
fn update_merges_field_by_field() {
    let (service, _, _) = build_lifecycle();
    let id = {
        let mut request = interview_request();
        request.notes = Some("covers systems design".to_string());
        service.create(CandidateId(1), request).expect("created").id
    };

    let patch = InterviewPatch {
        score: Some(87),
        result: Some(InterviewResult::Passed),
        ..InterviewPatch::default()
    };
    let updated = service
        .update(CandidateId(1), id, patch)
        .expect("update succeeds");

    assert_eq!(updated.score, Some(87));
    assert_eq!(updated.result, InterviewResult::Passed);
    // Unpatched fields fall back to the stored values.
    assert_eq!(updated.notes.as_deref(), Some("covers systems design"));
    assert_eq!(updated.interview_step_id, InterviewStepId(2));
    assert_eq!(updated.interview_date, date(2026, 6, 15));
}

#[test]
fn update_never_repoints_the_application() {
    let (service, store, _) = build_lifecycle();
    let id = service
        .create(CandidateId(1), interview_request())
        .expect("created")
        .id;

    let patch = InterviewPatch {
        application_id: Some(ApplicationId(99)),
        score: Some(42),
        ..InterviewPatch::default()
    };
    let updated = service
        .update(CandidateId(1), id, patch)
        .expect("update succeeds");

    assert_eq!(updated.application_id, ApplicationId(1));
    let persisted = store
        .interview(id)
        .expect("store reachable")
        .expect("still present");
    assert_eq!(persisted.application_id, ApplicationId(1));
}

#[test]
fn update_rejects_unknown_interviews() {
    let (service, _, _) = build_lifecycle();

    match service.update(CandidateId(1), InterviewId(404), InterviewPatch::default()) {
        Err(InterviewServiceError::Reference(ReferenceError::NotFound(EntityKind::Interview))) => {
        }
        other => panic!("expected missing interview, got {other:?}"),
    }
}

#[test]
fn update_rejects_other_candidates() {
    let (service, store, _) = build_lifecycle();
    let rival = seed_rival_candidate(&store);
    let id = service
        .create(CandidateId(1), interview_request())
        .expect("created")
        .id;

    match service.update(rival, id, InterviewPatch::default()) {
        Err(InterviewServiceError::Reference(ReferenceError::OwnershipMismatch { .. })) => {}
        other => panic!("expected ownership mismatch, got {other:?}"),
    }
}

#[test]
fn update_revalidates_step_only_when_patched() {
    let (service, store, _) = build_lifecycle();
    let foreign = seed_foreign_step(&store);
    let id = service
        .create(CandidateId(1), interview_request())
        .expect("created")
        .id;

    // Patch without a step: no step validation runs.
    service
        .update(
            CandidateId(1),
            id,
            InterviewPatch {
                score: Some(70),
                ..InterviewPatch::default()
            },
        )
        .expect("score-only patch passes");

    // Patch with a foreign step: flow membership re-checked.
    let patch = InterviewPatch {
        interview_step_id: Some(foreign),
        ..InterviewPatch::default()
    };
    match service.update(CandidateId(1), id, patch) {
        Err(InterviewServiceError::Reference(ReferenceError::FlowMismatch { .. })) => {}
        other => panic!("expected flow mismatch, got {other:?}"),
    }
}

#[test]
fn update_revalidates_employee_only_when_patched() {
    let (service, _, _) = build_lifecycle();
    let id = service
        .create(CandidateId(1), interview_request())
        .expect("created")
        .id;

    let patch = InterviewPatch {
        employee_id: Some(EmployeeId(4)),
        ..InterviewPatch::default()
    };
    match service.update(CandidateId(1), id, patch) {
        Err(InterviewServiceError::Reference(ReferenceError::InactiveEmployee(_))) => {}
        other => panic!("expected inactive employee, got {other:?}"),
    }
}

#[test]
fn update_allows_completed_interviews() {
    // Only deletion is gated on the result; an already-Passed interview can
    // still have its fields amended.
    let (service, store, _) = build_lifecycle();
    let id = seed_interview(&store, 30, InterviewResult::Passed);

    let patch = InterviewPatch {
        score: Some(91),
        ..InterviewPatch::default()
    };
    let updated = service
        .update(CandidateId(1), id, patch)
        .expect("completed interviews stay updatable");
    assert_eq!(updated.score, Some(91));
    assert_eq!(updated.result, InterviewResult::Passed);
}

#[test]
fn delete_removes_pending_interviews_and_records_an_audit_entry() {
    let (service, store, audit) = build_lifecycle();
    let id = service
        .create(CandidateId(1), interview_request())
        .expect("created")
        .id;

    let removed = service
        .delete(
            CandidateId(1),
            id,
            DeleteInterviewRequest {
                reason: Some("candidate withdrew".to_string()),
            },
        )
        .expect("pending interviews can be deleted");

    assert_eq!(removed.id, id);
    assert!(store
        .interview(id)
        .expect("store reachable")
        .is_none());

    let entries = audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].interview_id, id);
    assert_eq!(entries[0].candidate_id, CandidateId(1));
    assert_eq!(entries[0].reason.as_deref(), Some("candidate withdrew"));
}

#[test]
fn delete_rejects_completed_interviews_without_touching_the_store() {
    let (service, store, audit) = build_lifecycle();

    for (id, result) in [(31, InterviewResult::Passed), (32, InterviewResult::Failed)] {
        let interview_id = seed_interview(&store, id, result);

        match service.delete(CandidateId(1), interview_id, DeleteInterviewRequest::default()) {
            Err(err @ InterviewServiceError::CompletedInterviewImmutable { .. }) => {
                assert_eq!(err.to_string(), "Completed interviews cannot be deleted");
            }
            other => panic!("expected the deletion gate, got {other:?}"),
        }

        // The record survived and no audit entry was written.
        assert!(store
            .interview(interview_id)
            .expect("store reachable")
            .is_some());
    }

    assert!(audit.entries().is_empty());
}

#[test]
fn delete_checks_the_candidate_before_the_interview() {
    let (service, store, _) = build_lifecycle();
    let id = seed_interview(&store, 33, InterviewResult::Pending);

    match service.delete(CandidateId(404), id, DeleteInterviewRequest::default()) {
        Err(InterviewServiceError::Reference(ReferenceError::NotFound(EntityKind::Candidate))) => {
        }
        other => panic!("expected missing candidate, got {other:?}"),
    }
    assert!(store
        .interview(id)
        .expect("store reachable")
        .is_some());
}

#[test]
fn delete_survives_audit_failures() {
    let store = sample_store();
    let service = InterviewLifecycleService::new(Arc::new(store.clone()), Arc::new(FailingAuditTrail));
    let id = seed_interview(&store, 34, InterviewResult::Pending);

    service
        .delete(CandidateId(1), id, DeleteInterviewRequest::default())
        .expect("audit failures are swallowed");
    assert!(store
        .interview(id)
        .expect("store reachable")
        .is_none());
}

#[test]
fn advance_stage_moves_the_application_pointer() {
    let (service, store, _) = build_lifecycle();

    let updated = service
        .advance_stage(CandidateId(1), ApplicationId(1), InterviewStepId(2))
        .expect("step 2 belongs to the position's flow");

    assert_eq!(updated.current_interview_step, InterviewStepId(2));
    assert_eq!(
        stored_application(&store).current_interview_step,
        InterviewStepId(2)
    );
}

#[test]
fn advance_stage_hides_applications_of_other_candidates() {
    let (service, store, _) = build_lifecycle();
    let rival = seed_rival_candidate(&store);

    match service.advance_stage(rival, ApplicationId(1), InterviewStepId(2)) {
        Err(InterviewServiceError::Reference(ReferenceError::NotFound(
            EntityKind::Application,
        ))) => {}
        other => panic!("expected missing application, got {other:?}"),
    }
}

#[test]
fn advance_stage_rejects_steps_outside_the_flow() {
    let (service, store, _) = build_lifecycle();
    let foreign = seed_foreign_step(&store);

    match service.advance_stage(CandidateId(1), ApplicationId(1), foreign) {
        Err(InterviewServiceError::Reference(ReferenceError::FlowMismatch { .. })) => {}
        other => panic!("expected flow mismatch, got {other:?}"),
    }
    assert_eq!(
        stored_application(&store).current_interview_step,
        InterviewStepId(1)
    );
}
