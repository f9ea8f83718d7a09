use crate::dashboards::{Action, Notification, ensure_enabled, open_filter};
use crate::error::{DashboardError, RequestError, RoadRemoteError};
use crate::roadremote::{RequestContext, RoadRemote};
use crate::store::Store;
use crate::types::{HelpRequest, RequestId};
use rr_events::types::EventSource;

/// The driver's side of a request: confirm the helper once one accepts.
pub struct DriverDashboard<'a, S: Store> {
    core: &'a RoadRemote<S>,
    ctx: RequestContext,
    driver_name: Option<String>,
}

impl<'a, S: Store> DriverDashboard<'a, S> {
    pub fn new(core: &'a RoadRemote<S>) -> Self {
        Self {
            core,
            ctx: RequestContext::from_source(EventSource::Driver),
            driver_name: None,
        }
    }

    /// Restricts the view and actions to one driver's requests.
    pub fn for_driver(mut self, name: impl Into<String>) -> Self {
        self.driver_name = Some(name.into());
        self
    }

    /// Requests that are still open.
    pub fn requests(&self) -> Result<Vec<HelpRequest>, RoadRemoteError> {
        let mut requests = self.core.requests().list(&open_filter())?;
        requests.retain(|request| self.owns(request));
        Ok(requests)
    }

    pub fn confirm(&self, id: &RequestId) -> Result<Notification, RoadRemoteError> {
        let request = self
            .core
            .requests()
            .get(id)?
            .ok_or(RequestError::NotFound)?;
        if !self.owns(&request) {
            return Err(DashboardError::NotVisible.into());
        }
        ensure_enabled(Action::Confirm, request.status)?;
        self.core
            .requests()
            .update_status(&self.ctx, id, Action::Confirm.target())?;
        Ok(Notification::new(
            "Help Confirmed!",
            format!(
                "Request #{} is confirmed. Your helper is on the way.",
                id.short()
            ),
        ))
    }

    fn owns(&self, request: &HelpRequest) -> bool {
        self.driver_name
            .as_deref()
            .is_none_or(|name| request.driver_name == name)
    }
}
