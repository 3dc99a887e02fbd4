// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Rating for user({0}) on movie({1}) already exists")]
    DuplicateRating(i32, i32),

    #[error("Couldn't found user with id({0})")]
    UserNotFound(i32),

    #[error("Couldn't found movie with id({0})")]
    MovieNotFound(i32),

    #[error("Couldn't found rating for user({0}) on movie({1})")]
    RatingNotFound(i32, i32),
}
