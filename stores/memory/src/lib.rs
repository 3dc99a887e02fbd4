// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::Error;
use store::error::ErrorKind;
use store::{
    Genre, GenreRepository, Movie, MovieRepository, NewMovie, NewRating, NewUser, Rating,
    RatingRepository, User, UserRepository,
};

/// Store that keeps every table in memory. Used by the test suites and
/// by the server when it runs without a database, ids come from the
/// atomic counters and start at 1 like a serial column would.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<i32, User>>,
    movies: Mutex<HashMap<i32, Movie>>,
    genres: Mutex<Vec<Genre>>,
    ratings: Mutex<HashMap<i32, Rating>>,
    next_user_id: AtomicI32,
    next_movie_id: AtomicI32,
    next_rating_id: AtomicI32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(table: &Mutex<T>) -> Result<MutexGuard<T>, Error> {
    table.lock().map_err(|_| ErrorKind::PoisonedLock.into())
}

impl UserRepository for MemoryStore {
    fn find_by_id(&self, id: i32) -> Result<Option<User>, Error> {
        let users = lock(&self.users)?;
        Ok(users.get(&id).cloned())
    }

    fn insert(&self, new_user: &NewUser) -> Result<User, Error> {
        let mut users = lock(&self.users)?;
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;

        let user = User {
            id,
            name: new_user.name.clone(),
        };

        users.insert(id, user.clone());
        Ok(user)
    }
}

impl MovieRepository for MemoryStore {
    fn find_by_id(&self, id: i32) -> Result<Option<Movie>, Error> {
        let movies = lock(&self.movies)?;
        Ok(movies.get(&id).cloned())
    }

    fn all(&self) -> Result<Vec<Movie>, Error> {
        let movies = lock(&self.movies)?;
        let mut movies: Vec<_> = movies.values().cloned().collect();
        movies.sort_by_key(|movie| movie.id);

        Ok(movies)
    }

    fn insert(&self, new_movie: &NewMovie) -> Result<Movie, Error> {
        let mut movies = lock(&self.movies)?;
        let mut genres = lock(&self.genres)?;
        let id = self.next_movie_id.fetch_add(1, Ordering::SeqCst) + 1;

        let movie = Movie {
            id,
            title: new_movie.title.clone(),
            genres: new_movie.genres.clone(),
        };

        // The genre catalog is derived from the movies that mention them
        for name in &movie.genres {
            if !genres.iter().any(|genre| &genre.name == name) {
                genres.push(Genre { name: name.clone() });
            }
        }

        movies.insert(id, movie.clone());
        Ok(movie)
    }
}

impl GenreRepository for MemoryStore {
    fn all(&self) -> Result<Vec<Genre>, Error> {
        let genres = lock(&self.genres)?;
        Ok(genres.clone())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Genre>, Error> {
        let genres = lock(&self.genres)?;
        Ok(genres.iter().find(|genre| genre.name == name).cloned())
    }
}

impl RatingRepository for MemoryStore {
    fn find_by_user_and_movie(&self, user_id: i32, movie_id: i32) -> Result<Option<Rating>, Error> {
        let ratings = lock(&self.ratings)?;
        let rating = ratings
            .values()
            .find(|rating| rating.user_id == user_id && rating.movie_id == movie_id)
            .cloned();

        Ok(rating)
    }

    fn exists_by_user_and_movie(&self, user_id: i32, movie_id: i32) -> Result<bool, Error> {
        Ok(self.find_by_user_and_movie(user_id, movie_id)?.is_some())
    }

    fn find_by_user(&self, user_id: i32) -> Result<Vec<Rating>, Error> {
        let ratings = lock(&self.ratings)?;
        let mut ratings: Vec<_> = ratings
            .values()
            .filter(|rating| rating.user_id == user_id)
            .cloned()
            .collect();
        ratings.sort_by_key(|rating| rating.id);

        Ok(ratings)
    }

    fn insert(&self, new_rating: &NewRating) -> Result<Rating, Error> {
        let mut ratings = lock(&self.ratings)?;

        // Same guarantee the unique index on (user_id, movie_id) gives
        let duplicate = ratings.values().any(|rating| {
            rating.user_id == new_rating.user_id && rating.movie_id == new_rating.movie_id
        });

        if duplicate {
            return Err(
                ErrorKind::DuplicateRating(new_rating.user_id, new_rating.movie_id).into(),
            );
        }

        let id = self.next_rating_id.fetch_add(1, Ordering::SeqCst) + 1;
        let rating = Rating {
            id,
            user_id: new_rating.user_id,
            movie_id: new_rating.movie_id,
            score: new_rating.score,
        };

        ratings.insert(id, rating.clone());
        Ok(rating)
    }

    fn update(&self, rating: &Rating) -> Result<Rating, Error> {
        let mut ratings = lock(&self.ratings)?;
        ratings.insert(rating.id, rating.clone());

        Ok(rating.clone())
    }

    fn delete(&self, rating: &Rating) -> Result<(), Error> {
        let mut ratings = lock(&self.ratings)?;
        ratings.remove(&rating.id);

        Ok(())
    }
}
