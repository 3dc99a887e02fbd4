// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use diesel::pg::PgConnection;
use diesel::{insert_into, prelude::*};
use indicatif::ProgressIterator;
use postgres_store::establish_connection;
use postgres_store::models::genres::NewGenre;
use postgres_store::models::movies::{split_genres, NewMovieWithId};
use postgres_store::models::ratings::NewRating;
use postgres_store::models::users::NewUserWithId;
use postgres_store::schema::{genres, movies, ratings, users};
use std::collections::{BTreeSet, HashMap};

fn insert_users(conn: &PgConnection) -> Result<(), Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_path("data/users.csv")?;

    let mut users = Vec::new();
    println!("Collecting records for users...");
    let records: Vec<_> = csv.records().collect();

    for record in records.iter().progress() {
        if let Ok(record) = record {
            let id: i32 = record[0].parse()?;
            let name = &record[1];

            users.push(NewUserWithId { id, name });
        }
    }

    println!("Pushing into the database");
    insert_into(users::table).values(&users).execute(conn)?;

    Ok(())
}

fn insert_movies(conn: &PgConnection) -> Result<BTreeSet<String>, Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_path("data/movies.csv")?;

    let mut movies = Vec::new();
    let mut genre_names = BTreeSet::new();
    println!("Collecting records for movies...");
    let records: Vec<_> = csv.records().collect();

    for record in records.iter().progress() {
        if let Ok(record) = record {
            let id: i32 = record[0].parse().map_err(|e| {
                println!("Failed for {}", &record[0]);
                e
            })?;
            let title = &record[1];
            let genres = &record[2];

            for genre in split_genres(genres) {
                genre_names.insert(genre);
            }

            movies.push(NewMovieWithId { id, title, genres });
        }
    }

    println!("Pushing into the database");
    insert_into(movies::table).values(&movies).execute(conn)?;

    Ok(genre_names)
}

fn insert_genres(conn: &PgConnection, genre_names: &BTreeSet<String>) -> Result<(), Error> {
    let genres_rows: Vec<_> = genre_names.iter().map(|name| NewGenre { name }).collect();

    println!("Pushing {} genres into the database", genres_rows.len());
    insert_into(genres::table)
        .values(&genres_rows)
        .execute(conn)?;

    Ok(())
}

fn insert_ratings(conn: &PgConnection) -> Result<(), Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_path("data/ratings.csv")?;

    let mut ratings = Vec::new();
    println!("Collecting records for ratings...");
    let records: Vec<_> = csv.records().collect();

    for record in records.iter().progress() {
        if let Ok(record) = record {
            let user_id: i32 = record[0].parse()?;
            let movie_id: i32 = record[1].parse()?;
            let score: f64 = record[2].parse()?;

            ratings.push(NewRating {
                user_id,
                movie_id,
                score,
            });
        }
    }

    println!("Pushing ratings by chunks");
    for chunk in ratings.chunks(10_000).progress() {
        insert_into(ratings::table).values(chunk).execute(conn)?;
    }

    Ok(())
}

fn main() -> Result<(), Error> {
    let vars: HashMap<String, String> = dotenv::vars().collect();
    let psql_url = &vars["DATABASE_URL"];
    let conn = establish_connection(psql_url)?;

    insert_users(&conn)?;
    let genre_names = insert_movies(&conn)?;
    insert_genres(&conn, &genre_names)?;
    insert_ratings(&conn)?;

    Ok(())
}
