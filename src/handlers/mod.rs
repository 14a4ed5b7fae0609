// HTTP handlers and per-domain route builders
// Most handlers authorize through the AuthenticatedUser/OptionalUser
// extractors; the admin subtree and the payment verification route sit behind
// the auth + role middleware stack instead.

pub mod admin;
pub mod article;
pub mod auth;
pub mod business;
pub mod contributor;
pub mod event;
pub mod health;
pub mod job;
pub mod job_application;
pub mod payment;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;

use crate::app::AppState;
use crate::middleware::auth_middleware::{auth_middleware, require_admin};

// Authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
}

// Business routes
pub fn business_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(business::get_my_businesses))
        .route("/", post(business::create_business))
        .route("/{id}", get(business::get_business_detail))
}

// Job and job-application routes
pub fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(job::get_jobs).post(job::create_job))
        .route("/me/list", get(job::get_my_jobs))
        .route("/{id}", get(job::get_job_detail).patch(job::update_job))
        .route("/{id}/status", patch(job::change_job_status))
        .route(
            "/{id}/applications",
            post(job_application::create_job_application)
                .get(job_application::get_applications_for_job),
        )
}

pub fn job_application_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(job_application::get_application_detail))
}

// Contributor routes
pub fn contributor_routes() -> Router<AppState> {
    Router::new()
        .route("/apply", post(contributor::apply_contributor))
        .route("/me", get(contributor::get_my_contributor_profile))
}

// Article routes; the status change is admin-only
pub fn article_routes(state: AppState) -> Router<AppState> {
    let admin_status = Router::new()
        .route("/{id}/status", patch(article::change_article_status))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn_with_state(state, auth_middleware))
                .layer(from_fn(require_admin)),
        );

    Router::new()
        .route("/", get(article::get_articles).post(article::create_article))
        .route("/me/list", get(article::get_my_articles))
        .route(
            "/{id}",
            get(article::get_article_detail).patch(article::update_article),
        )
        .merge(admin_status)
}

// Event and registration routes
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(event::get_events).post(event::create_event))
        .route("/me/list", get(event::get_my_events))
        .route(
            "/registrations/me/list",
            get(event::get_my_event_registrations),
        )
        .route(
            "/{id}",
            get(event::get_event_detail).patch(event::update_event),
        )
        .route("/{id}/status", patch(event::change_event_status))
        .route(
            "/{id}/registrations",
            post(event::create_event_registration).get(event::get_event_registrations),
        )
        .route(
            "/{id}/registrations/stats",
            get(event::get_event_registration_stats),
        )
}

// Payment routes; verification is admin-only
pub fn payment_routes(state: AppState) -> Router<AppState> {
    let admin_verify = Router::new()
        .route("/admin/{id}/verify", patch(payment::verify_event_payment))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn_with_state(state, auth_middleware))
                .layer(from_fn(require_admin)),
        );

    Router::new()
        .route("/{id}/proof", patch(payment::attach_payment_proof))
        .route("/me/list", get(payment::get_my_payments))
        .route("/events/{id}", get(payment::get_event_payments_for_creator))
        .merge(admin_verify)
}

// Admin routes, all behind auth + ADMIN role
pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::get_users))
        .route("/users/{id}", get(admin::get_user_detail))
        .route("/users/{id}/status", patch(admin::update_user_status))
        .route("/businesses", get(admin::get_businesses))
        .route(
            "/businesses/{id}/status",
            patch(admin::update_business_status),
        )
        .route("/jobs", get(admin::get_jobs))
        .route("/jobs/{id}/status", patch(admin::update_job_status))
        .route("/articles", get(admin::get_articles))
        .route("/articles/{id}/status", patch(admin::update_article_status))
        .route("/events", get(admin::get_events))
        .route("/events/{id}/status", patch(admin::update_event_status))
        .route("/payments", get(admin::get_payments))
        .route("/payments/{id}", get(admin::get_payment_detail))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn_with_state(state, auth_middleware))
                .layer(from_fn(require_admin)),
        )
}
