// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod entity;
pub mod error;

use anyhow::Error;

pub use entity::{Genre, Movie, NewMovie, NewRating, NewUser, Rating, User};
pub use error::ErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Access to the users table.
pub trait UserRepository: Send + Sync {
    /// Get the user identified by `id`, if any.
    fn find_by_id(&self, id: i32) -> Result<Option<User>>;

    /// Insert a new user, returns it with its assigned id.
    fn insert(&self, new: &NewUser) -> Result<User>;
}

/// Access to the movies table.
pub trait MovieRepository: Send + Sync {
    /// Get the movie identified by `id`, if any.
    fn find_by_id(&self, id: i32) -> Result<Option<Movie>>;

    /// Get all movies in the catalog.
    fn all(&self) -> Result<Vec<Movie>>;

    /// Insert a new movie, returns it with its assigned id.
    fn insert(&self, new: &NewMovie) -> Result<Movie>;
}

/// Access to the genre catalog.
pub trait GenreRepository: Send + Sync {
    /// Get all known genres.
    fn all(&self) -> Result<Vec<Genre>>;

    /// Get the genre with the given name, if any.
    fn find_by_name(&self, name: &str) -> Result<Option<Genre>>;
}

/// Access to the ratings table. A rating is unique per (user, movie) pair,
/// lookups on the pair return at most one record.
pub trait RatingRepository: Send + Sync {
    /// Get the rating `user_id` gave to `movie_id`, if any.
    fn find_by_user_and_movie(&self, user_id: i32, movie_id: i32) -> Result<Option<Rating>>;

    /// Whether a rating from `user_id` on `movie_id` exists.
    fn exists_by_user_and_movie(&self, user_id: i32, movie_id: i32) -> Result<bool>;

    /// Get all ratings made by `user_id`.
    fn find_by_user(&self, user_id: i32) -> Result<Vec<Rating>>;

    /// Persist a new rating, returns it with its assigned id.
    fn insert(&self, new: &NewRating) -> Result<Rating>;

    /// Persist a changed rating, identified by its id.
    fn update(&self, rating: &Rating) -> Result<Rating>;

    /// Remove the given rating from storage.
    fn delete(&self, rating: &Rating) -> Result<()>;
}
