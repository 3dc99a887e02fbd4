// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::{EventProducer, Result};
use config::EventsConfig;
use mongodb::bson::doc;
use mongodb::sync::{Client, Database};

/// Producer that appends every rating event to a MongoDB collection,
/// consumers tail the collection to rebuild their views.
pub struct MongoProducer {
    mongo_db: Database,
    collection: String,
}

impl MongoProducer {
    pub fn with_url(mongo_url: &str, mongo_db: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongo_url)?;
        let mongo_db = client.database(mongo_db);

        Ok(Self {
            mongo_db,
            collection: collection.into(),
        })
    }

    pub fn from_config(events: &EventsConfig) -> Result<Self> {
        Self::with_url(&events.mongo_url, &events.mongo_db, &events.collection)
    }
}

impl EventProducer for MongoProducer {
    fn send_rating_event(&self, movie_id: i32, user_id: i32, score: f64) -> Result<()> {
        let collection = self.mongo_db.collection(&self.collection);

        let event = doc! {
            "movie_id": movie_id,
            "user_id": user_id,
            "score": score,
        };

        collection.insert_one(event, None)?;
        Ok(())
    }
}
