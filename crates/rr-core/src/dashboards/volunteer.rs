use crate::dashboards::{Action, Notification, ensure_enabled, volunteer_filter};
use crate::error::{DashboardError, RequestError, RoadRemoteError, VolunteerError};
use crate::roadremote::{RequestContext, RoadRemote};
use crate::store::Store;
use crate::types::{HelpRequest, HelperType, RequestId, Volunteer, VolunteerId};
use rr_events::types::EventSource;

pub struct VolunteerDashboard<'a, S: Store> {
    core: &'a RoadRemote<S>,
    ctx: RequestContext,
    available: bool,
    volunteer_id: Option<VolunteerId>,
}

impl<'a, S: Store> VolunteerDashboard<'a, S> {
    pub fn new(core: &'a RoadRemote<S>) -> Self {
        Self {
            core,
            ctx: RequestContext::from_source(EventSource::Volunteer),
            available: true,
            volunteer_id: None,
        }
    }

    /// Pins the profile shown in [`stats`](Self::stats). Without it the
    /// first volunteer in the store is used.
    pub fn for_volunteer(mut self, id: VolunteerId) -> Self {
        self.volunteer_id = Some(id);
        self
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn set_available(&mut self, available: bool) {
        tracing::debug!(available, "volunteer availability changed");
        self.available = available;
    }

    /// Pending requests open to volunteers. Accepted ones drop out of this
    /// view even though garages may still see theirs.
    pub fn requests(&self) -> Result<Vec<HelpRequest>, RoadRemoteError> {
        self.core.requests().list(&volunteer_filter())
    }

    pub fn accept(&self, id: &RequestId) -> Result<Notification, RoadRemoteError> {
        let request = self
            .core
            .requests()
            .get(id)?
            .ok_or(RequestError::NotFound)?;
        if request.helper_type == HelperType::Garage {
            return Err(DashboardError::NotVisible.into());
        }
        if !self.available {
            return Err(DashboardError::Unavailable.into());
        }
        ensure_enabled(Action::Accept, request.status)?;
        self.core
            .requests()
            .update_status(&self.ctx, id, Action::Accept.target())?;
        Ok(Notification::new(
            "Request Accepted!",
            format!(
                "You are now assigned to help {}. The driver has been notified.",
                request.driver_name
            ),
        ))
    }

    /// Points and badges of the active volunteer.
    pub fn stats(&self) -> Result<Volunteer, RoadRemoteError> {
        let volunteer = match &self.volunteer_id {
            Some(id) => self.core.volunteers().get(id)?,
            None => self.core.volunteers().list()?.into_iter().next(),
        };
        volunteer.ok_or_else(|| VolunteerError::NotFound.into())
    }
}
