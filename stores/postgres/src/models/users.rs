use crate::schema::users;

// To query data from the database
#[derive(Debug, Clone, Queryable)]
pub struct User {
    pub id: i32,
    pub name: String,
}

impl From<User> for store::User {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

// To insert a new user into the database
#[derive(Debug, Clone, Insertable)]
#[table_name = "users"]
pub struct NewUser<'a> {
    pub name: &'a str,
}

// To bulk load users keeping the ids from the source records
#[derive(Debug, Clone, Insertable)]
#[table_name = "users"]
pub struct NewUserWithId<'a> {
    pub id: i32,
    pub name: &'a str,
}
