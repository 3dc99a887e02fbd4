// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::api::{ApiError, AppState};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use service::error::ErrorKind as ServiceError;

#[derive(Debug, Deserialize)]
pub struct CreateRating {
    pub user_id: i32,
    pub movie_id: i32,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRating {
    pub score: f64,
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRating>,
) -> Result<impl IntoResponse, ApiError> {
    let rating = state
        .service
        .create_rating(input.user_id, input.movie_id, input.score)?;

    Ok((StatusCode::CREATED, Json(rating)))
}

pub async fn find(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    let rating = state
        .ratings
        .find_by_user_and_movie(user_id, movie_id)?
        .ok_or_else(|| ServiceError::RatingNotFound(user_id, movie_id))?;

    Ok(Json(rating))
}

pub async fn update(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i32, i32)>,
    Json(input): Json<UpdateRating>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state
        .service
        .update_rating(user_id, movie_id, input.score)?
        .ok_or_else(|| ServiceError::RatingNotFound(user_id, movie_id))?;

    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_rating(user_id, movie_id)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let ratings = state.ratings.find_by_user(user_id)?;

    Ok(Json(ratings))
}
