// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::ratings;

// To query data from the database
#[derive(Debug, Clone, Queryable)]
pub struct Rating {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub score: f64,
}

impl From<Rating> for store::Rating {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id,
            user_id: rating.user_id,
            movie_id: rating.movie_id,
            score: rating.score,
        }
    }
}

// To insert a new rating into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "ratings"]
pub struct NewRating {
    pub user_id: i32,
    pub movie_id: i32,
    pub score: f64,
}
