// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod error;

use crate::error::ErrorKind;
use anyhow::Error;
use events::EventProducer;
use log::warn;
use std::sync::Arc;
use store::{MovieRepository, NewRating, Rating, RatingRepository, UserRepository};

/// Coordinates every rating mutation, checks referential rules against
/// the stores and publishes an event for each accepted write.
pub struct RatingService {
    ratings: Arc<dyn RatingRepository>,
    users: Arc<dyn UserRepository>,
    movies: Arc<dyn MovieRepository>,
    producer: Arc<dyn EventProducer>,
}

impl RatingService {
    pub fn new(
        ratings: Arc<dyn RatingRepository>,
        users: Arc<dyn UserRepository>,
        movies: Arc<dyn MovieRepository>,
        producer: Arc<dyn EventProducer>,
    ) -> Self {
        Self {
            ratings,
            users,
            movies,
            producer,
        }
    }

    /// Create a rating, the (user, movie) pair must not be rated yet
    /// and both referenced entities must exist.
    pub fn create_rating(&self, user_id: i32, movie_id: i32, score: f64) -> Result<Rating, Error> {
        if self.ratings.exists_by_user_and_movie(user_id, movie_id)? {
            return Err(ErrorKind::DuplicateRating(user_id, movie_id).into());
        }

        if self.users.find_by_id(user_id)?.is_none() {
            return Err(ErrorKind::UserNotFound(user_id).into());
        }

        if self.movies.find_by_id(movie_id)?.is_none() {
            return Err(ErrorKind::MovieNotFound(movie_id).into());
        }

        let rating = self.ratings.insert(&NewRating {
            user_id,
            movie_id,
            score,
        })?;

        self.publish(movie_id, user_id, score);
        Ok(rating)
    }

    /// Replace the score of an existing rating, returns `None` when the
    /// user never rated the movie. The rating id never changes.
    pub fn update_rating(
        &self,
        user_id: i32,
        movie_id: i32,
        score: f64,
    ) -> Result<Option<Rating>, Error> {
        let rating = self.ratings.find_by_user_and_movie(user_id, movie_id)?;

        match rating {
            Some(mut rating) => {
                rating.score = score;
                let updated = self.ratings.update(&rating)?;

                self.publish(movie_id, user_id, score);
                Ok(Some(updated))
            }

            None => Ok(None),
        }
    }

    /// Remove a rating, removing an absent one is a silent no-op and no
    /// event is emitted either way.
    pub fn delete_rating(&self, user_id: i32, movie_id: i32) -> Result<(), Error> {
        if let Some(rating) = self.ratings.find_by_user_and_movie(user_id, movie_id)? {
            self.ratings.delete(&rating)?;
        }

        Ok(())
    }

    // Best effort, a failed publish never rolls back the write
    fn publish(&self, movie_id: i32, user_id: i32, score: f64) {
        if let Err(e) = self.producer.send_rating_event(movie_id, user_id, score) {
            warn!(
                "Couldn't publish event for movie({}) user({}): {}",
                movie_id, user_id, e
            );
        }
    }
}
