use crate::error::RoadRemoteError;
use rr_events::types::EventRecord;

pub trait EventRepository {
    /// Assigns `id` and `seq`.
    fn append(&self, event: EventRecord) -> Result<EventRecord, RoadRemoteError>;
    fn list(
        &self,
        after: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<EventRecord>, RoadRemoteError>;
}
