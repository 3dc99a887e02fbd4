// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::movies;

// To query data from the database
#[derive(Debug, Clone, Queryable)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub genres: String,
}

impl From<Movie> for store::Movie {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            genres: split_genres(&movie.genres),
        }
    }
}

/// Split a pipe-joined genre column ("Action|Comedy") into a genre list.
/// An empty column maps to an empty list.
pub fn split_genres(genres: &str) -> Vec<String> {
    genres
        .split('|')
        .filter(|genre| !genre.is_empty())
        .map(String::from)
        .collect()
}

/// Join a genre list back into the pipe-joined column shape.
pub fn join_genres(genres: &[String]) -> String {
    genres.join("|")
}

// To insert a new movie into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "movies"]
pub struct NewMovie<'a> {
    pub title: &'a str,
    pub genres: String,
}

// To bulk load movies keeping the ids from the source records
#[derive(Debug, Clone, Insertable)]
#[table_name = "movies"]
pub struct NewMovieWithId<'a> {
    pub id: i32,
    pub title: &'a str,
    pub genres: &'a str,
}
