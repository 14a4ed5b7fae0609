// Job application model
// Applications are either PLATFORM (CV + portfolio kept on the platform) or
// EXTERNAL (a tracked click out to the employer's own channel). Guests may
// apply without an account by supplying contact fields.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::job_applications;
use crate::utils::api_error::{ApiError, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationMethod {
    Platform,
    External,
}

impl ApplicationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationMethod::Platform => "PLATFORM",
            ApplicationMethod::External => "EXTERNAL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PLATFORM" => Some(ApplicationMethod::Platform),
            "EXTERNAL" => Some(ApplicationMethod::External),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Submitted,
    Clicked,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "SUBMITTED",
            ApplicationStatus::Clicked => "CLICKED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = job_applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: Uuid,
    pub job_post_id: Uuid,
    pub user_id: Option<Uuid>,
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    pub application_method: String,
    pub cv_url: Option<String>,
    pub resume_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub cover_letter: Option<String>,
    pub external_target: Option<String>,
    pub external_destination: Option<String>,
    pub external_clicked_at: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = job_applications)]
pub struct NewJobApplication {
    pub job_post_id: Uuid,
    pub user_id: Option<Uuid>,
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    pub application_method: String,
    pub cv_url: Option<String>,
    pub resume_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub cover_letter: Option<String>,
    pub external_target: Option<String>,
    pub external_destination: Option<String>,
    pub external_clicked_at: Option<DateTime<Utc>>,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobApplicationRequest {
    pub application_method: Option<String>,
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    pub cv_url: Option<String>,
    pub resume_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub cover_letter: Option<String>,
    pub external_target: Option<String>,
    pub external_destination: Option<String>,
}

impl CreateJobApplicationRequest {
    /// Method-specific required fields, plus contact fields for guests.
    /// Returns the parsed method when the payload is coherent.
    pub fn validate(&self, authenticated: bool) -> Result<ApplicationMethod, ApiError> {
        let method_str = match &self.application_method {
            Some(m) if !m.trim().is_empty() => m.as_str(),
            _ => {
                return Err(ApiError::validation_field(
                    "applicationMethod",
                    "Application method is required",
                ))
            },
        };

        let method = ApplicationMethod::from_str(method_str).ok_or_else(|| {
            ApiError::validation_field(
                "applicationMethod",
                "Application method must be PLATFORM or EXTERNAL",
            )
        })?;

        let mut details: Vec<FieldError> = Vec::new();

        match method {
            ApplicationMethod::Platform => {
                if self.cv_url.is_none() {
                    details.push(FieldError::new("cvUrl", "CV URL is required"));
                }
                if self.portfolio_url.is_none() {
                    details.push(FieldError::new(
                        "portfolioUrl",
                        "Portfolio URL is required",
                    ));
                }
            },
            ApplicationMethod::External => {
                if self.external_target.is_none() {
                    details.push(FieldError::new(
                        "externalTarget",
                        "External target is required",
                    ));
                }
                if self.external_destination.is_none() {
                    details.push(FieldError::new(
                        "externalDestination",
                        "External destination is required",
                    ));
                }
            },
        }

        if !authenticated {
            if self.applicant_name.is_none() {
                details.push(FieldError::new(
                    "applicantName",
                    "Applicant name is required for guest applications",
                ));
            }
            if self.applicant_email.is_none() {
                details.push(FieldError::new(
                    "applicantEmail",
                    "Applicant email is required for guest applications",
                ));
            }
        }

        if details.is_empty() {
            Ok(method)
        } else {
            Err(ApiError::validation("Validation error", details))
        }
    }
}

impl JobApplication {
    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_application: NewJobApplication,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::job_applications::dsl;

        diesel::insert_into(dsl::job_applications)
            .values(&new_application)
            .get_result::<JobApplication>(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        application_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::job_applications::dsl;

        dsl::job_applications
            .filter(dsl::id.eq(application_id))
            .select(JobApplication::as_select())
            .first::<JobApplication>(conn)
            .await
            .optional()
    }

    pub async fn list_for_job(
        conn: &mut AsyncPgConnection,
        job_id: Uuid,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        use crate::schema::job_applications::dsl;

        dsl::job_applications
            .filter(dsl::job_post_id.eq(job_id))
            .order(dsl::created_at.desc())
            .select(JobApplication::as_select())
            .load::<JobApplication>(conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateJobApplicationRequest {
        CreateJobApplicationRequest {
            application_method: None,
            applicant_name: None,
            applicant_email: None,
            cv_url: None,
            resume_url: None,
            portfolio_url: None,
            cover_letter: None,
            external_target: None,
            external_destination: None,
        }
    }

    #[test]
    fn test_method_is_required() {
        let err = base_request().validate(true).unwrap_err();
        match err {
            ApiError::Validation { details, .. } => {
                assert_eq!(details[0].field, "applicationMethod");
            },
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_platform_requires_cv_and_portfolio() {
        let request = CreateJobApplicationRequest {
            application_method: Some("PLATFORM".to_string()),
            cv_url: Some("https://cdn.example.com/cv.pdf".to_string()),
            ..base_request()
        };

        let err = request.validate(true).unwrap_err();
        match err {
            ApiError::Validation { details, .. } => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "portfolioUrl");
            },
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_external_requires_target_and_destination() {
        let request = CreateJobApplicationRequest {
            application_method: Some("EXTERNAL".to_string()),
            ..base_request()
        };

        let err = request.validate(true).unwrap_err();
        match err {
            ApiError::Validation { details, .. } => {
                let fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
                assert_eq!(fields, vec!["externalTarget", "externalDestination"]);
            },
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_guest_requires_contact_fields() {
        let request = CreateJobApplicationRequest {
            application_method: Some("EXTERNAL".to_string()),
            external_target: Some("WEBSITE".to_string()),
            external_destination: Some("https://jobs.example.com/apply".to_string()),
            ..base_request()
        };

        let err = request.validate(false).unwrap_err();
        match err {
            ApiError::Validation { details, .. } => {
                let fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
                assert_eq!(fields, vec!["applicantName", "applicantEmail"]);
            },
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_guest_external_application() {
        let request = CreateJobApplicationRequest {
            application_method: Some("EXTERNAL".to_string()),
            applicant_name: Some("Guest Applicant".to_string()),
            applicant_email: Some("guest@example.com".to_string()),
            external_target: Some("WEBSITE".to_string()),
            external_destination: Some("https://jobs.example.com/apply".to_string()),
            ..base_request()
        };

        let method = request.validate(false).expect("should validate");
        assert_eq!(method, ApplicationMethod::External);
    }
}
