use crate::types::enums::{HelperType, RequestStatus};
use crate::types::ids::{BadgeId, RequestId, VolunteerId};
use crate::types::request::HelpRequest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateHelpRequestInput {
    #[serde(default)]
    pub id: Option<RequestId>,
    pub driver_name: String,
    pub vehicle: String,
    pub issue: String,
    pub location: String,
    pub distance: f64,
    pub timestamp: String,
    pub helper_type: HelperType,
    #[serde(default)]
    pub status: Option<RequestStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVolunteerInput {
    #[serde(default)]
    pub id: Option<VolunteerId>,
    pub name: String,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub badges: Vec<AwardBadgeInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardBadgeInput {
    pub id: BadgeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// `None` fields do not constrain the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFilter {
    pub helper_type: Option<Vec<HelperType>>,
    pub status: Option<Vec<RequestStatus>>,
}

impl RequestFilter {
    pub fn matches(&self, request: &HelpRequest) -> bool {
        let helper_ok = self
            .helper_type
            .as_ref()
            .is_none_or(|types| types.contains(&request.helper_type));
        let status_ok = self
            .status
            .as_ref()
            .is_none_or(|statuses| statuses.contains(&request.status));
        helper_ok && status_ok
    }
}
