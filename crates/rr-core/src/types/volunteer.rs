use crate::types::ids::{BadgeId, VolunteerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub name: String,
    pub points: u32,
    /// Earn order.
    pub badges: Vec<Badge>,
}

impl Volunteer {
    pub fn has_badge(&self, id: &BadgeId) -> bool {
        self.badges.iter().any(|badge| &badge.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub earned_at: Option<DateTime<Utc>>,
}
