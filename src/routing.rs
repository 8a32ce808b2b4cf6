use crate::{
    application::{ApplicationMiddleware, ApplicationState},
    auth::{self, User},
    dto::{input, output},
    error::Error,
    service::{
        accounts_service::AccountsService, bookings_service::BookingsService,
        events_service::EventsService, recommendations_service::RecommendationsService,
    },
};
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    routing::{get, post, put},
    Extension, Json, Router,
};
use bson::oid::ObjectId;
use serde_json::{json, Value};
use std::sync::Arc;

pub fn routing(application_middleware: &ApplicationMiddleware) -> Router<ApplicationState> {
    let public = Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password", post(reset_password))
        .route("/api/events", get(find_active_events))
        .route("/api/events/:id", get(find_event));

    let protected = Router::new()
        .route("/api/events", post(create_event))
        .route("/api/events/admin/all", get(find_all_events))
        .route("/api/events/:id", put(update_event).delete(delete_event))
        .route("/api/events/:id/toggle-active", put(update_event_is_active))
        .route("/api/bookings", get(find_user_bookings).post(create_booking))
        .route("/api/bookings/recommendations", get(find_recommendations))
        .route("/api/bookings/:id/download", get(download_eticket))
        .route_layer(application_middleware.auth.clone());

    public.merge(protected)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "message": "Server is running" }))
}

async fn signup(
    State(accounts_service): State<Arc<dyn AccountsService>>,
    Json(signup): Json<input::Signup>,
) -> Result<(StatusCode, Json<output::AuthSession>), Error> {
    let session = accounts_service.signup(signup).await?;

    Ok((StatusCode::CREATED, Json(session)))
}

async fn login(
    State(accounts_service): State<Arc<dyn AccountsService>>,
    Json(login): Json<input::Login>,
) -> Result<Json<output::AuthSession>, Error> {
    let session = accounts_service.login(login).await?;

    Ok(Json(session))
}

async fn forgot_password(
    State(accounts_service): State<Arc<dyn AccountsService>>,
    Json(request): Json<input::ForgotPassword>,
) -> Result<Json<output::Message>, Error> {
    accounts_service.forgot_password(request).await?;

    Ok(Json(output::Message {
        message: "OTP sent to your email",
    }))
}

async fn reset_password(
    State(accounts_service): State<Arc<dyn AccountsService>>,
    Json(request): Json<input::ResetPassword>,
) -> Result<Json<output::Message>, Error> {
    accounts_service.reset_password(request).await?;

    Ok(Json(output::Message {
        message: "Password reset successfully",
    }))
}

async fn find_active_events(
    State(events_service): State<Arc<dyn EventsService>>,
    Query(filters): Query<input::EventFilters>,
) -> Result<Json<Vec<output::Event>>, Error> {
    let category = filters.category.filter(|category| category != "All");

    let events = events_service.find_active_events(category).await?;

    Ok(Json(events))
}

async fn find_all_events(
    State(events_service): State<Arc<dyn EventsService>>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<output::Event>>, Error> {
    auth::require_admin(&user)?;

    let events = events_service.find_all_events().await?;

    Ok(Json(events))
}

async fn find_event(
    State(events_service): State<Arc<dyn EventsService>>,
    Path(id): Path<String>,
) -> Result<Json<output::Event>, Error> {
    let id = ObjectId::parse_str(&id).map_err(|_| Error::EventNotExist)?;

    let event = events_service.find_event(id).await?;

    Ok(Json(event))
}

async fn create_event(
    State(events_service): State<Arc<dyn EventsService>>,
    Extension(user): Extension<User>,
    Json(event): Json<input::Event>,
) -> Result<(StatusCode, Json<output::Event>), Error> {
    auth::require_admin(&user)?;

    let event = events_service.create_event(user.id, event).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

async fn update_event(
    State(events_service): State<Arc<dyn EventsService>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(event): Json<input::Event>,
) -> Result<Json<output::Event>, Error> {
    auth::require_admin(&user)?;
    let id = ObjectId::parse_str(&id).map_err(|_| Error::EventNotExist)?;

    let event = events_service.update_event(id, event).await?;

    Ok(Json(event))
}

async fn update_event_is_active(
    State(events_service): State<Arc<dyn EventsService>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(is_active): Json<input::EventIsActive>,
) -> Result<Json<output::Event>, Error> {
    auth::require_admin(&user)?;
    let id = ObjectId::parse_str(&id).map_err(|_| Error::EventNotExist)?;

    let event = events_service
        .update_event_is_active(id, is_active.is_active)
        .await?;

    Ok(Json(event))
}

async fn delete_event(
    State(events_service): State<Arc<dyn EventsService>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<output::Message>, Error> {
    auth::require_admin(&user)?;
    let id = ObjectId::parse_str(&id).map_err(|_| Error::EventNotExist)?;

    events_service.delete_event(id).await?;

    Ok(Json(output::Message {
        message: "Event deleted successfully",
    }))
}

async fn create_booking(
    State(bookings_service): State<Arc<dyn BookingsService>>,
    Extension(user): Extension<User>,
    Json(booking): Json<input::Booking>,
) -> Result<(StatusCode, Json<output::Booking>), Error> {
    let booking = bookings_service.create_booking(user.id, booking).await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

async fn find_user_bookings(
    State(bookings_service): State<Arc<dyn BookingsService>>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<output::Booking>>, Error> {
    let bookings = bookings_service.find_user_bookings(user.id).await?;

    Ok(Json(bookings))
}

async fn find_recommendations(
    State(recommendations_service): State<Arc<dyn RecommendationsService>>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<output::Event>>, Error> {
    let recommendations = recommendations_service
        .find_recommendations(user.id)
        .await?;

    Ok(Json(recommendations))
}

async fn download_eticket(
    State(bookings_service): State<Arc<dyn BookingsService>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Response, Error> {
    let id = ObjectId::parse_str(&id).map_err(|_| Error::BookingNotExist)?;

    let eticket = bookings_service.download_eticket(id, user.id).await?;

    let response = Response::builder()
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", eticket.filename),
        )
        .body(Body::from(eticket.content))
        .map_err(anyhow::Error::from)?;

    Ok(response)
}
