use crate::schema::genres;

// To query data from the database
#[derive(Debug, Clone, Queryable)]
pub struct Genre {
    pub name: String,
}

impl From<Genre> for store::Genre {
    fn from(genre: Genre) -> Self {
        Self { name: genre.name }
    }
}

// To insert a new genre into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "genres"]
pub struct NewGenre<'a> {
    pub name: &'a str,
}
