//! Role dashboards over the shared [`RoadRemote`](crate::RoadRemote) store.
//!
//! A dashboard is a headless view model: it projects the current request
//! snapshot through its role's filter and turns user actions into store
//! commands. Button enablement is checked here first, then the store's
//! lifecycle rules apply regardless.

pub mod driver;
pub mod garage;
pub mod volunteer;

pub use driver::DriverDashboard;
pub use garage::GarageDashboard;
pub use volunteer::VolunteerDashboard;

use crate::error::DashboardError;
use crate::types::{HelperType, RequestFilter, RequestStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const EMPTY_VIEW_MESSAGE: &str = "No active requests in your area. Check back soon!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Garage,
    Volunteer,
    Driver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Accept,
    Complete,
    Confirm,
}

impl Action {
    pub fn target(self) -> RequestStatus {
        match self {
            Self::Accept => RequestStatus::Accepted,
            Self::Complete => RequestStatus::Completed,
            Self::Confirm => RequestStatus::Confirmed,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Accept => "accept",
            Self::Complete => "complete",
            Self::Confirm => "confirm",
        })
    }
}

/// Payload for the toast display after a successful action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Every garage-typed request, whatever its status.
pub fn garage_filter() -> RequestFilter {
    RequestFilter {
        helper_type: Some(vec![HelperType::Garage]),
        status: None,
    }
}

/// Pending requests any volunteer may take.
pub fn volunteer_filter() -> RequestFilter {
    RequestFilter {
        helper_type: Some(vec![HelperType::Volunteer, HelperType::Any]),
        status: Some(vec![RequestStatus::Pending]),
    }
}

/// Requests a driver is still waiting on.
pub fn open_filter() -> RequestFilter {
    RequestFilter {
        helper_type: None,
        status: Some(
            RequestStatus::ALL
                .into_iter()
                .filter(|status| !status.is_terminal())
                .collect(),
        ),
    }
}

/// Mirrors the dashboards' button states.
pub fn action_enabled(action: Action, status: RequestStatus) -> bool {
    match action {
        Action::Accept => status == RequestStatus::Pending,
        Action::Complete => !matches!(status, RequestStatus::Pending | RequestStatus::Completed),
        Action::Confirm => status == RequestStatus::Accepted,
    }
}

pub fn status_label(role: Role, status: RequestStatus) -> &'static str {
    match (role, status) {
        (Role::Garage, RequestStatus::Confirmed) => "Confirmed by Driver",
        _ => status.as_str(),
    }
}

pub(crate) fn ensure_enabled(action: Action, status: RequestStatus) -> Result<(), DashboardError> {
    if action_enabled(action, status) {
        Ok(())
    } else {
        Err(DashboardError::ActionDisabled { action, status })
    }
}
