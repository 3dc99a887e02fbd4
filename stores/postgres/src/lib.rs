// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

#[macro_use]
extern crate diesel;

pub mod models;
pub mod schema;

use crate::models::genres::Genre;
use crate::models::movies::{join_genres, Movie, NewMovie};
use crate::models::ratings::{NewRating, Rating};
use crate::models::users::{NewUser, User};
use crate::schema::{genres, movies, ratings, users};
use anyhow::Error;
use config::Config;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::{delete, insert_into, prelude::*, select, update};
use std::sync::{Mutex, MutexGuard};
use store::error::ErrorKind;
use store::{GenreRepository, MovieRepository, RatingRepository, UserRepository};

pub fn establish_connection(url: &str) -> Result<PgConnection, Error> {
    Ok(PgConnection::establish(&url)?)
}

/// Repository backed by a PostgreSQL database. The connection is wrapped
/// in a mutex so the store can be shared between handler threads.
pub struct PostgresStore {
    pg_conn: Mutex<PgConnection>,
}

impl PostgresStore {
    pub fn with_url(psql_url: &str) -> Result<Self, Error> {
        let pg_conn = Mutex::new(establish_connection(psql_url)?);
        Ok(Self { pg_conn })
    }

    pub fn from_config(config: &Config, name: &str) -> Result<Self, Error> {
        let database = config
            .databases
            .get(name)
            .ok_or_else(|| ErrorKind::DbConfigError(name.into()))?;

        Self::with_url(&database.psql_url)
    }

    fn conn(&self) -> Result<MutexGuard<PgConnection>, Error> {
        self.pg_conn
            .lock()
            .map_err(|_| ErrorKind::PoisonedLock.into())
    }
}

impl UserRepository for PostgresStore {
    fn find_by_id(&self, id: i32) -> Result<Option<store::User>, Error> {
        let conn = self.conn()?;
        let user = users::table
            .filter(users::id.eq(id))
            .first::<User>(&*conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn insert(&self, new_user: &store::NewUser) -> Result<store::User, Error> {
        let conn = self.conn()?;
        let user: User = insert_into(users::table)
            .values(&NewUser {
                name: &new_user.name,
            })
            .get_result(&*conn)?;

        Ok(user.into())
    }
}

impl MovieRepository for PostgresStore {
    fn find_by_id(&self, id: i32) -> Result<Option<store::Movie>, Error> {
        let conn = self.conn()?;
        let movie = movies::table
            .filter(movies::id.eq(id))
            .first::<Movie>(&*conn)
            .optional()?;

        Ok(movie.map(Into::into))
    }

    fn all(&self) -> Result<Vec<store::Movie>, Error> {
        let conn = self.conn()?;
        let movies = movies::table.load::<Movie>(&*conn)?;

        Ok(movies.into_iter().map(Into::into).collect())
    }

    fn insert(&self, new_movie: &store::NewMovie) -> Result<store::Movie, Error> {
        let conn = self.conn()?;
        let movie: Movie = insert_into(movies::table)
            .values(&NewMovie {
                title: &new_movie.title,
                genres: join_genres(&new_movie.genres),
            })
            .get_result(&*conn)?;

        Ok(movie.into())
    }
}

impl GenreRepository for PostgresStore {
    fn all(&self) -> Result<Vec<store::Genre>, Error> {
        let conn = self.conn()?;
        let genres = genres::table.load::<Genre>(&*conn)?;

        Ok(genres.into_iter().map(Into::into).collect())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<store::Genre>, Error> {
        let conn = self.conn()?;
        let genre = genres::table
            .filter(genres::name.eq(name))
            .first::<Genre>(&*conn)
            .optional()?;

        Ok(genre.map(Into::into))
    }
}

impl RatingRepository for PostgresStore {
    fn find_by_user_and_movie(
        &self,
        user_id: i32,
        movie_id: i32,
    ) -> Result<Option<store::Rating>, Error> {
        let conn = self.conn()?;
        let rating = ratings::table
            .filter(ratings::user_id.eq(user_id))
            .filter(ratings::movie_id.eq(movie_id))
            .first::<Rating>(&*conn)
            .optional()?;

        Ok(rating.map(Into::into))
    }

    fn exists_by_user_and_movie(&self, user_id: i32, movie_id: i32) -> Result<bool, Error> {
        let conn = self.conn()?;
        let found = select(exists(
            ratings::table
                .filter(ratings::user_id.eq(user_id))
                .filter(ratings::movie_id.eq(movie_id)),
        ))
        .get_result(&*conn)?;

        Ok(found)
    }

    fn find_by_user(&self, user_id: i32) -> Result<Vec<store::Rating>, Error> {
        let conn = self.conn()?;
        let ratings = ratings::table
            .filter(ratings::user_id.eq(user_id))
            .load::<Rating>(&*conn)?;

        Ok(ratings.into_iter().map(Into::into).collect())
    }

    fn insert(&self, new_rating: &store::NewRating) -> Result<store::Rating, Error> {
        let conn = self.conn()?;
        let rating: Rating = insert_into(ratings::table)
            .values(&NewRating {
                user_id: new_rating.user_id,
                movie_id: new_rating.movie_id,
                score: new_rating.score,
            })
            .get_result(&*conn)?;

        Ok(rating.into())
    }

    fn update(&self, rating: &store::Rating) -> Result<store::Rating, Error> {
        let conn = self.conn()?;
        let updated = update(ratings::table)
            .filter(ratings::id.eq(rating.id))
            .set(ratings::score.eq(rating.score))
            .get_result::<Rating>(&*conn)?;

        Ok(updated.into())
    }

    fn delete(&self, rating: &store::Rating) -> Result<(), Error> {
        let conn = self.conn()?;
        delete(ratings::table)
            .filter(ratings::id.eq(rating.id))
            .execute(&*conn)?;

        Ok(())
    }
}
