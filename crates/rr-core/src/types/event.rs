use crate::types::{Badge, HelpRequest, RequestStatus, Volunteer, VolunteerId};
use chrono::{DateTime, Utc};
use rr_events::types::{EventRecord, EventSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub seq: i64,
    pub at: DateTime<Utc>,
    pub correlation_id: Option<String>,
    pub source: EventSource,
    pub body: EventBody,
}

impl TryFrom<&EventRecord> for Event {
    type Error = serde_json::Error;

    fn try_from(record: &EventRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.clone(),
            seq: record.seq,
            at: record.at,
            correlation_id: record.correlation_id.clone(),
            source: record.source,
            body: serde_json::from_value(record.body.clone())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum EventBody {
    RequestCreated {
        request: HelpRequest,
    },
    RequestStatusChanged {
        request: HelpRequest,
        from: RequestStatus,
        to: RequestStatus,
    },

    VolunteerCreated {
        volunteer: Volunteer,
    },
    PointsAwarded {
        volunteer_id: VolunteerId,
        points: u32,
        total: u32,
    },
    BadgeAwarded {
        volunteer_id: VolunteerId,
        badge: Badge,
    },
}
