// Status set and workflow-rule tests covering the per-entity allowed values,
// the registration amount computation and application payload validation

use chrono::Utc;
use uuid::Uuid;

use loka_backend_core::models::article::ArticleStatus;
use loka_backend_core::models::business::BusinessStatus;
use loka_backend_core::models::event::{
    Event, EventStatus, RegistrationStatus, DEFAULT_EVENT_TYPE, EVENT_ADMIN_FEE_IDR,
    QUOTA_COUNTED_STATUSES,
};
use loka_backend_core::models::job::JobStatusCode;
use loka_backend_core::models::job_application::CreateJobApplicationRequest;
use loka_backend_core::models::payment::{PaymentStatus, PaymentVerdict};
use loka_backend_core::models::status::EntityStatus;
use loka_backend_core::utils::api_error::ApiError;

fn assert_allowed_values_error(err: ApiError, expected_message: &str) {
    match err {
        ApiError::Validation { details, .. } => {
            assert_eq!(details.len(), 1);
            assert_eq!(details[0].field, "status");
            assert_eq!(details[0].message, expected_message);
        },
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
fn test_every_entity_rejects_values_outside_its_set() {
    assert_allowed_values_error(
        BusinessStatus::parse_request("ACTIVE").unwrap_err(),
        "Status must be one of PENDING, APPROVED, REJECTED",
    );
    assert_allowed_values_error(
        JobStatusCode::parse_request("PUBLISHED").unwrap_err(),
        "Status must be one of ACTIVE, SUSPENDED, ARCHIVED",
    );
    assert_allowed_values_error(
        ArticleStatus::parse_request("DRAFT").unwrap_err(),
        "Status must be one of PUBLISHED, SUSPENDED, ARCHIVED",
    );
    assert_allowed_values_error(
        EventStatus::parse_request("PENDING").unwrap_err(),
        "Status must be one of PUBLISHED, CANCELLED, ARCHIVED, DRAFT",
    );
    assert_allowed_values_error(
        PaymentVerdict::parse_request("PENDING").unwrap_err(),
        "Status must be one of VERIFIED, REJECTED",
    );
}

#[test]
fn test_members_of_each_set_parse() {
    assert_eq!(
        BusinessStatus::parse_request("APPROVED").unwrap(),
        BusinessStatus::Approved
    );
    assert_eq!(
        JobStatusCode::parse_request("ARCHIVED").unwrap(),
        JobStatusCode::Archived
    );
    assert_eq!(
        ArticleStatus::parse_request("SUSPENDED").unwrap(),
        ArticleStatus::Suspended
    );
    assert_eq!(
        EventStatus::parse_request("DRAFT").unwrap(),
        EventStatus::Draft
    );
    assert_eq!(
        PaymentStatus::parse_request("PENDING").unwrap(),
        PaymentStatus::Pending
    );
}

#[test]
fn test_status_validation_errors_are_unprocessable_entity() {
    let err = EventStatus::parse_request("LIVE").unwrap_err();
    assert_eq!(err.status_code().as_u16(), 422);
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

fn paid_event(price: i64, quota: Option<i32>) -> Event {
    let now = Utc::now();
    Event {
        id: Uuid::new_v4(),
        creator_id: Uuid::new_v4(),
        title: "Community Workshop".to_string(),
        slug: "community-workshop-1700000000000".to_string(),
        event_type: DEFAULT_EVENT_TYPE.to_string(),
        description: "Hands-on workshop".to_string(),
        location: "Bandung".to_string(),
        start_datetime: now,
        end_datetime: now,
        is_paid: price > 0,
        price_per_person: if price > 0 { Some(price) } else { None },
        admin_fee: if price > 0 { EVENT_ADMIN_FEE_IDR } else { 0 },
        quota,
        status: EventStatus::Published.as_str().to_string(),
        published_at: Some(now),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_paid_registration_amount_includes_admin_fee() {
    let event = paid_event(50_000, Some(100));
    assert_eq!(event.registration_amount(), 52_500);
}

#[test]
fn test_free_registration_amount_is_zero() {
    let event = paid_event(0, None);
    assert_eq!(event.registration_amount(), 0);
}

#[test]
fn test_quota_counts_pending_and_confirmed_only() {
    assert_eq!(QUOTA_COUNTED_STATUSES.len(), 2);
    assert!(QUOTA_COUNTED_STATUSES.contains(&RegistrationStatus::PendingPayment.as_str()));
    assert!(QUOTA_COUNTED_STATUSES.contains(&RegistrationStatus::Confirmed.as_str()));
    assert!(!QUOTA_COUNTED_STATUSES.contains(&RegistrationStatus::Rejected.as_str()));
}

#[test]
fn test_platform_application_missing_portfolio_url() {
    let request = CreateJobApplicationRequest {
        application_method: Some("PLATFORM".to_string()),
        applicant_name: None,
        applicant_email: None,
        cv_url: Some("https://cdn.example.com/cv.pdf".to_string()),
        resume_url: None,
        portfolio_url: None,
        cover_letter: None,
        external_target: None,
        external_destination: None,
    };

    let err = request.validate(true).unwrap_err();
    match err {
        ApiError::Validation { details, .. } => {
            assert_eq!(details.len(), 1);
            assert_eq!(details[0].field, "portfolioUrl");
            assert_eq!(details[0].message, "Portfolio URL is required");
        },
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
fn test_guest_external_application_with_contact_fields_is_valid() {
    let request = CreateJobApplicationRequest {
        application_method: Some("EXTERNAL".to_string()),
        applicant_name: Some("Guest Applicant".to_string()),
        applicant_email: Some("guest@example.com".to_string()),
        cv_url: None,
        resume_url: None,
        portfolio_url: None,
        cover_letter: None,
        external_target: Some("WEBSITE".to_string()),
        external_destination: Some("https://careers.example.com".to_string()),
    };

    assert!(request.validate(false).is_ok());
}
