// Event and registration handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::event::{
        CreateEventRequest, Event, EventRegistration, EventWithCreator, UpdateEventRequest,
    },
    models::pagination::{default_limit, default_page, Page},
    services::event::{self, EventFilters, RegistrationOutcome, RegistrationStats},
    utils::{api_error::ApiError, api_response::ApiSuccess, validation::RequiredFields},
};

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub q: Option<String>,
    #[serde(default)]
    pub upcoming: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: Option<String>,
}

/// GET /api/events
pub async fn get_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<ApiSuccess<Vec<EventWithCreator>>, ApiError> {
    let page = Page::new(query.page, query.limit);
    let filters = EventFilters {
        q: query.q,
        upcoming: query.upcoming.unwrap_or(false),
    };

    let (items, meta) = event::list_public(&state.db_pool, filters, page).await?;

    Ok(ApiSuccess::paginated("Events fetched successfully", items, meta))
}

/// GET /api/events/me/list
pub async fn get_my_events(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<Event>>, ApiError> {
    let page = Page::new(query.page, query.limit);

    let (items, meta) = event::list_my_events(&state.db_pool, user.id, page).await?;

    Ok(ApiSuccess::paginated("Events fetched successfully", items, meta))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateEventRequest>,
) -> Result<ApiSuccess<Event>, ApiError> {
    let mut fields = RequiredFields::new();
    fields
        .require_str("title", request.title.as_ref(), "Title is required")
        .require_str(
            "description",
            request.description.as_ref(),
            "Description is required",
        )
        .require_str("location", request.location.as_ref(), "Location is required")
        .require(
            "startDatetime",
            &request.start_datetime,
            "Start datetime is required",
        )
        .require(
            "endDatetime",
            &request.end_datetime,
            "End datetime is required",
        );
    fields.check()?;

    let created = event::create_event(&state.db_pool, user.id, request).await?;

    Ok(ApiSuccess::created("Event created successfully", created))
}

/// GET /api/events/{idOrSlug}
pub async fn get_event_detail(
    State(state): State<AppState>,
    Path(id_or_slug): Path<String>,
) -> Result<ApiSuccess<EventWithCreator>, ApiError> {
    let found = event::get_public(&state.db_pool, &id_or_slug).await?;

    Ok(ApiSuccess::ok("Event fetched successfully", found))
}

/// PATCH /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<ApiSuccess<Event>, ApiError> {
    let updated = event::update_event(&state.db_pool, user.id, id, request).await?;

    Ok(ApiSuccess::ok("Event updated successfully", updated))
}

/// PATCH /api/events/{id}/status
pub async fn change_event_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Result<ApiSuccess<Event>, ApiError> {
    let status = body
        .status
        .ok_or_else(|| ApiError::validation_field("status", "Status is required"))?;

    let updated = event::change_status(&state.db_pool, Some(user.id), id, &status).await?;

    Ok(ApiSuccess::ok("Event status updated successfully", updated))
}

/// POST /api/events/{eventId}/registrations
pub async fn create_event_registration(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> Result<ApiSuccess<RegistrationOutcome>, ApiError> {
    let outcome = event::register_for_event(&state.db_pool, user.id, event_id).await?;

    Ok(ApiSuccess::created(
        "Event registration created successfully",
        outcome,
    ))
}

/// GET /api/events/{eventId}/registrations
pub async fn get_event_registrations(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> Result<ApiSuccess<Vec<EventRegistration>>, ApiError> {
    let registrations = event::list_registrations(&state.db_pool, user.id, event_id).await?;

    Ok(ApiSuccess::ok(
        "Event registrations fetched successfully",
        registrations,
    ))
}

/// GET /api/events/{eventId}/registrations/stats
pub async fn get_event_registration_stats(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> Result<ApiSuccess<RegistrationStats>, ApiError> {
    let stats = event::registration_stats(&state.db_pool, user.id, event_id).await?;

    Ok(ApiSuccess::ok(
        "Event registration stats fetched successfully",
        stats,
    ))
}

/// GET /api/events/registrations/me/list
pub async fn get_my_event_registrations(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<EventRegistration>>, ApiError> {
    let page = Page::new(query.page, query.limit);

    let (items, meta) = event::list_my_registrations(&state.db_pool, user.id, page).await?;

    Ok(ApiSuccess::paginated(
        "Event registrations fetched successfully",
        items,
        meta,
    ))
}
