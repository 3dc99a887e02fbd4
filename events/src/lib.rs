// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod error;
pub mod memory;
pub mod mongo;

use anyhow::Error;
use serde::{Deserialize, Serialize};

pub use memory::MemoryProducer;
pub use mongo::MongoProducer;

pub type Result<T> = std::result::Result<T, Error>;

/// Emitted every time a rating is created or its score changes, other
/// services consume these to keep their models fresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEvent {
    pub movie_id: i32,
    pub user_id: i32,
    pub score: f64,
}

/// Sink for rating events, implementors decide where they end up.
pub trait EventProducer: Send + Sync {
    fn send_rating_event(&self, movie_id: i32, user_id: i32, score: f64) -> Result<()>;
}

/// Producer that only logs the events, the default when no event sink
/// is configured.
#[derive(Debug, Default)]
pub struct LogProducer;

impl EventProducer for LogProducer {
    fn send_rating_event(&self, movie_id: i32, user_id: i32, score: f64) -> Result<()> {
        log::info!(
            "rating event: movie({}) user({}) score({})",
            movie_id,
            user_id,
            score
        );

        Ok(())
    }
}
