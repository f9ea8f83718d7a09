use crate::dashboards::{Action, Notification, ensure_enabled, garage_filter};
use crate::error::{DashboardError, RequestError, RoadRemoteError};
use crate::roadremote::{RequestContext, RoadRemote};
use crate::store::Store;
use crate::types::{HelpRequest, RequestId};
use rr_events::types::EventSource;

pub struct GarageDashboard<'a, S: Store> {
    core: &'a RoadRemote<S>,
    ctx: RequestContext,
    available: bool,
}

impl<'a, S: Store> GarageDashboard<'a, S> {
    pub fn new(core: &'a RoadRemote<S>) -> Self {
        Self {
            core,
            ctx: RequestContext::from_source(EventSource::Garage),
            available: true,
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.ctx.correlation_id = Some(correlation_id.into());
        self
    }

    /// "Open for Business".
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn set_available(&mut self, available: bool) {
        tracing::debug!(available, "garage availability changed");
        self.available = available;
    }

    pub fn requests(&self) -> Result<Vec<HelpRequest>, RoadRemoteError> {
        self.core.requests().list(&garage_filter())
    }

    pub fn accept(&self, id: &RequestId) -> Result<Notification, RoadRemoteError> {
        let request = self.load(id)?;
        if !self.available {
            return Err(DashboardError::Unavailable.into());
        }
        ensure_enabled(Action::Accept, request.status)?;
        self.core
            .requests()
            .update_status(&self.ctx, id, Action::Accept.target())?;
        Ok(Notification::new(
            "Job Accepted!",
            format!(
                "You are assigned to assist {}. The driver has been notified to confirm.",
                request.driver_name
            ),
        ))
    }

    pub fn complete(&self, id: &RequestId) -> Result<Notification, RoadRemoteError> {
        let request = self.load(id)?;
        ensure_enabled(Action::Complete, request.status)?;
        self.core
            .requests()
            .update_status(&self.ctx, id, Action::Complete.target())?;
        Ok(Notification::new(
            "Job Completed!",
            format!("Request #{} has been marked as completed.", id.short()),
        ))
    }

    fn load(&self, id: &RequestId) -> Result<HelpRequest, RoadRemoteError> {
        let request = self
            .core
            .requests()
            .get(id)?
            .ok_or(RequestError::NotFound)?;
        if !garage_filter().matches(&request) {
            return Err(DashboardError::NotVisible.into());
        }
        Ok(request)
    }
}
