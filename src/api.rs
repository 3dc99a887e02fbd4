// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

//! HTTP layer, maps routes to the repositories and the rating service.

pub mod catalog;
pub mod ratings;

use anyhow::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use service::error::ErrorKind as ServiceError;
use service::RatingService;
use std::sync::Arc;
use store::ErrorKind as StoreError;
use store::{GenreRepository, MovieRepository, RatingRepository, UserRepository};

/// Everything the handlers need, shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub movies: Arc<dyn MovieRepository>,
    pub genres: Arc<dyn GenreRepository>,
    pub ratings: Arc<dyn RatingRepository>,
    pub service: Arc<RatingService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(catalog::create_user))
        .route("/users/:id", get(catalog::get_user))
        .route("/users/:id/ratings", get(ratings::list_for_user))
        .route(
            "/movies",
            get(catalog::list_movies).post(catalog::create_movie),
        )
        .route("/movies/:id", get(catalog::get_movie))
        .route("/genres", get(catalog::list_genres))
        .route("/ratings", post(ratings::create))
        .route(
            "/ratings/:user_id/:movie_id",
            get(ratings::find)
                .put(ratings::update)
                .delete(ratings::remove),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// Error wrapper that renders as `{ "error": .. }` with the status code
/// matching the error kind.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(kind: ServiceError) -> Self {
        Self(kind.into())
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        if let Some(kind) = self.0.downcast_ref::<ServiceError>() {
            return match kind {
                ServiceError::DuplicateRating(_, _) => StatusCode::CONFLICT,
                ServiceError::UserNotFound(_)
                | ServiceError::MovieNotFound(_)
                | ServiceError::RatingNotFound(_, _) => StatusCode::NOT_FOUND,
            };
        }

        // The storage unique index is the backstop for racing creates
        if let Some(StoreError::DuplicateRating(_, _)) = self.0.downcast_ref::<StoreError>() {
            return StatusCode::CONFLICT;
        }

        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "error": self.0.to_string() });

        (status, Json(body)).into_response()
    }
}
