use crate::error::{RequestError, RoadRemoteError, VolunteerError};
use crate::events::EventRepository;
use crate::requests::RequestRepository;
use crate::store::Store;
use crate::types::event::EventBody;
use crate::types::{
    AwardBadgeInput, Badge, CreateHelpRequestInput, CreateVolunteerInput, HelpRequest,
    RequestFilter, RequestId, RequestStatus, Volunteer, VolunteerId,
};
use crate::validation::{
    validate_create_request, validate_create_volunteer, validate_request_status_transition,
};
use crate::volunteers::VolunteerRepository;
use chrono::Utc;
use rr_events::bus::EventBus;
use rr_events::listeners::{ListenerId, Listeners};
use rr_events::types::{EventRecord, EventSource};

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub source: EventSource,
    pub correlation_id: Option<String>,
}

impl RequestContext {
    pub fn new(source: EventSource, correlation_id: Option<String>) -> Self {
        Self {
            source,
            correlation_id,
        }
    }

    pub fn from_source(source: EventSource) -> Self {
        Self::new(source, None)
    }
}

/// The application's single state container.
///
/// Owned by the application root and lent to dashboards by reference. Every
/// mutation goes through one of the command APIs, runs in a store
/// transaction, appends an event, and then notifies the bus and the
/// synchronous listeners. Rejected commands emit nothing.
pub struct RoadRemote<S: Store> {
    store: S,
    event_bus: EventBus,
    listeners: Listeners,
}

impl<S: Store> RoadRemote<S> {
    pub fn new(store: S, event_bus: EventBus) -> Self {
        Self {
            store,
            event_bus,
            listeners: Listeners::new(),
        }
    }

    pub fn requests(&self) -> RequestsApi<'_, S> {
        RequestsApi { core: self }
    }

    pub fn volunteers(&self) -> VolunteersApi<'_, S> {
        VolunteersApi { core: self }
    }

    pub fn events(&self) -> EventsApi<'_, S> {
        EventsApi { core: self }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Registers a listener that runs after every committed mutation.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&EventRecord) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn with_events<T, F>(&self, ctx: &RequestContext, f: F) -> Result<T, RoadRemoteError>
    where
        F: FnOnce(&S) -> Result<(T, Vec<EventBody>), RoadRemoteError>,
    {
        let (value, records) = self.store.with_tx(|store| {
            let (value, bodies) = f(store)?;
            let mut records = Vec::new();
            for body in bodies {
                let record = build_event_record(ctx, body)?;
                let record = store.events().append(record)?;
                records.push(record);
            }
            Ok((value, records))
        })?;
        for record in records {
            // No bus subscribers is not an error for the store.
            let _ = self.event_bus.publish(record.clone());
            self.listeners.notify(&record);
        }
        Ok(value)
    }
}

pub struct RequestsApi<'a, S: Store> {
    core: &'a RoadRemote<S>,
}

impl<'a, S: Store> RequestsApi<'a, S> {
    pub fn create(
        &self,
        ctx: &RequestContext,
        input: CreateHelpRequestInput,
    ) -> Result<HelpRequest, RoadRemoteError> {
        self.core.with_events(ctx, |store| {
            validate_create_request(&input)?;
            if let Some(id) = &input.id {
                if store.requests().get(id)?.is_some() {
                    return Err(RequestError::Conflict {
                        message: format!("request {id} already exists"),
                    }
                    .into());
                }
            }
            let request = store.requests().create(input)?;
            tracing::debug!(request_id = %request.id, helper = %request.helper_type, "request created");
            Ok((
                request.clone(),
                vec![EventBody::RequestCreated { request }],
            ))
        })
    }

    pub fn get(&self, id: &RequestId) -> Result<Option<HelpRequest>, RoadRemoteError> {
        self.core
            .store
            .requests()
            .get(id)
            .map_err(RoadRemoteError::from)
    }

    pub fn list(&self, filter: &RequestFilter) -> Result<Vec<HelpRequest>, RoadRemoteError> {
        self.core
            .store
            .requests()
            .list(filter)
            .map_err(RoadRemoteError::from)
    }

    /// Current snapshot of every request, in insertion order.
    pub fn all(&self) -> Result<Vec<HelpRequest>, RoadRemoteError> {
        self.list(&RequestFilter::default())
    }

    /// Moves a request to `status` if the lifecycle allows it. Only the
    /// status field changes.
    pub fn update_status(
        &self,
        ctx: &RequestContext,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<HelpRequest, RoadRemoteError> {
        let result = self.core.with_events(ctx, |store| {
            let Some(request) = store.requests().get(id)? else {
                return Err(RequestError::NotFound.into());
            };
            validate_request_status_transition(request.status, status)?;
            let updated = store.requests().set_status(id, status)?;
            Ok((
                updated.clone(),
                vec![EventBody::RequestStatusChanged {
                    request: updated,
                    from: request.status,
                    to: status,
                }],
            ))
        });
        match &result {
            Ok(_) => tracing::info!(request_id = %id, to = %status, source = ?ctx.source, "request status changed"),
            Err(err) => tracing::warn!(request_id = %id, to = %status, error = %err, "status change rejected"),
        }
        result
    }
}

pub struct VolunteersApi<'a, S: Store> {
    core: &'a RoadRemote<S>,
}

impl<'a, S: Store> VolunteersApi<'a, S> {
    pub fn create(
        &self,
        ctx: &RequestContext,
        input: CreateVolunteerInput,
    ) -> Result<Volunteer, RoadRemoteError> {
        self.core.with_events(ctx, |store| {
            validate_create_volunteer(&input)?;
            if let Some(id) = &input.id {
                if store.volunteers().get(id)?.is_some() {
                    return Err(VolunteerError::Conflict {
                        message: format!("volunteer {id} already exists"),
                    }
                    .into());
                }
            }
            let volunteer = store.volunteers().create(input)?;
            tracing::debug!(volunteer_id = %volunteer.id, "volunteer created");
            Ok((
                volunteer.clone(),
                vec![EventBody::VolunteerCreated { volunteer }],
            ))
        })
    }

    pub fn get(&self, id: &VolunteerId) -> Result<Option<Volunteer>, RoadRemoteError> {
        self.core
            .store
            .volunteers()
            .get(id)
            .map_err(RoadRemoteError::from)
    }

    pub fn list(&self) -> Result<Vec<Volunteer>, RoadRemoteError> {
        self.core
            .store
            .volunteers()
            .list()
            .map_err(RoadRemoteError::from)
    }

    pub fn award_points(
        &self,
        ctx: &RequestContext,
        id: &VolunteerId,
        points: u32,
    ) -> Result<Volunteer, RoadRemoteError> {
        self.core.with_events(ctx, |store| {
            if points == 0 {
                return Err(VolunteerError::InvalidInput {
                    message: "points must be positive".to_string(),
                }
                .into());
            }
            let volunteer = store.volunteers().add_points(id, points)?;
            tracing::info!(volunteer_id = %id, points, total = volunteer.points, "points awarded");
            Ok((
                volunteer.clone(),
                vec![EventBody::PointsAwarded {
                    volunteer_id: id.clone(),
                    points,
                    total: volunteer.points,
                }],
            ))
        })
    }

    pub fn award_badge(
        &self,
        ctx: &RequestContext,
        id: &VolunteerId,
        input: AwardBadgeInput,
    ) -> Result<Volunteer, RoadRemoteError> {
        self.core.with_events(ctx, |store| {
            if input.name.trim().is_empty() {
                return Err(VolunteerError::InvalidInput {
                    message: format!("badge {} needs a name", input.id),
                }
                .into());
            }
            let Some(current) = store.volunteers().get(id)? else {
                return Err(VolunteerError::NotFound.into());
            };
            if current.has_badge(&input.id) {
                return Err(VolunteerError::DuplicateBadge { badge_id: input.id }.into());
            }
            let badge = Badge {
                id: input.id,
                name: input.name,
                description: input.description,
                earned_at: Some(Utc::now()),
            };
            let volunteer = store.volunteers().add_badge(id, badge.clone())?;
            tracing::info!(volunteer_id = %id, badge_id = %badge.id, "badge awarded");
            Ok((
                volunteer,
                vec![EventBody::BadgeAwarded {
                    volunteer_id: id.clone(),
                    badge,
                }],
            ))
        })
    }
}

pub struct EventsApi<'a, S: Store> {
    core: &'a RoadRemote<S>,
}

impl<'a, S: Store> EventsApi<'a, S> {
    pub fn list(
        &self,
        after: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<EventRecord>, RoadRemoteError> {
        self.core.store.events().list(after, limit)
    }
}

fn build_event_record(
    ctx: &RequestContext,
    body: EventBody,
) -> Result<EventRecord, RoadRemoteError> {
    let body = serde_json::to_value(body).map_err(|err| RoadRemoteError::Internal {
        message: err.to_string(),
    })?;
    Ok(EventRecord {
        id: String::new(),
        seq: 0,
        at: Utc::now(),
        correlation_id: ctx.correlation_id.clone(),
        source: ctx.source,
        body,
    })
}
