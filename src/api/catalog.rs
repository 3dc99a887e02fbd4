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
use store::{NewMovie, NewUser};

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub genres: Vec<String>,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.insert(&NewUser { name: input.name })?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .users
        .find_by_id(id)?
        .ok_or_else(|| ServiceError::UserNotFound(id))?;

    Ok(Json(user))
}

pub async fn list_movies(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let movies = state.movies.all()?;

    Ok(Json(movies))
}

pub async fn create_movie(
    State(state): State<AppState>,
    Json(input): Json<CreateMovie>,
) -> Result<impl IntoResponse, ApiError> {
    let movie = state.movies.insert(&NewMovie {
        title: input.title,
        genres: input.genres,
    })?;

    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let movie = state
        .movies
        .find_by_id(id)?
        .ok_or_else(|| ServiceError::MovieNotFound(id))?;

    Ok(Json(movie))
}

pub async fn list_genres(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let genres = state.genres.all()?;

    Ok(Json(genres))
}
