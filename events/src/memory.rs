// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use crate::{EventProducer, RatingEvent, Result};
use std::sync::Mutex;

/// Producer that buffers events in memory so tests can inspect what was
/// published and in which order.
#[derive(Debug, Default)]
pub struct MemoryProducer {
    events: Mutex<Vec<RatingEvent>>,
}

impl MemoryProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Result<Vec<RatingEvent>> {
        let events = self.events.lock().map_err(|_| ErrorKind::PoisonedBuffer)?;
        Ok(events.clone())
    }
}

impl EventProducer for MemoryProducer {
    fn send_rating_event(&self, movie_id: i32, user_id: i32, score: f64) -> Result<()> {
        let mut events = self.events.lock().map_err(|_| ErrorKind::PoisonedBuffer)?;

        events.push(RatingEvent {
            movie_id,
            user_id,
            score,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_buffered_in_order() -> Result<()> {
        let producer = MemoryProducer::new();

        producer.send_rating_event(1, 10, 4.5)?;
        producer.send_rating_event(2, 10, 3.0)?;

        let events = producer.events()?;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].movie_id, 1);
        assert_eq!(events[1].movie_id, 2);

        Ok(())
    }
}
