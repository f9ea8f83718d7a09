use rr_core::error::{RequestError, RoadRemoteError, VolunteerError};
use rr_core::types::{
    AwardBadgeInput, BadgeId, CreateHelpRequestInput, CreateVolunteerInput, Event, EventBody,
    HelpRequest, HelperType, RequestFilter, RequestId, RequestStatus, VolunteerId,
};
use rr_core::{RequestContext, RoadRemote};
use rr_db::DbStore;
use rr_events::{EventBus, EventSource};
use std::cell::RefCell;
use std::rc::Rc;

fn setup() -> RoadRemote<DbStore> {
    RoadRemote::new(DbStore::in_memory().unwrap(), EventBus::new(64))
}

fn ctx() -> RequestContext {
    RequestContext::from_source(EventSource::Cli)
}

fn id(value: &str) -> RequestId {
    RequestId::new(value).unwrap()
}

fn request_input(id: &str, helper_type: HelperType) -> CreateHelpRequestInput {
    CreateHelpRequestInput {
        id: Some(RequestId::new(id).unwrap()),
        driver_name: format!("Driver {id}"),
        vehicle: "2018 Toyota Camry".to_string(),
        issue: "Engine won't start".to_string(),
        location: "5th & Main".to_string(),
        distance: 2.4,
        timestamp: "10 mins ago".to_string(),
        helper_type,
        status: None,
    }
}

fn seeded() -> RoadRemote<DbStore> {
    let core = setup();
    core.requests()
        .create(&ctx(), request_input("1", HelperType::Garage))
        .unwrap();
    core.requests()
        .create(&ctx(), request_input("2", HelperType::Volunteer))
        .unwrap();
    core
}

#[test]
fn update_changes_only_status() {
    let core = seeded();
    let before = core.requests().get(&id("1")).unwrap().unwrap();
    let after = core
        .requests()
        .update_status(&ctx(), &id("1"), RequestStatus::Accepted)
        .unwrap();
    assert_eq!(
        after,
        HelpRequest {
            status: RequestStatus::Accepted,
            ..before
        }
    );
    assert_eq!(core.requests().get(&id("1")).unwrap(), Some(after));
}

#[test]
fn full_lifecycle_through_confirmation() {
    let core = seeded();
    for status in [
        RequestStatus::Accepted,
        RequestStatus::Confirmed,
        RequestStatus::Completed,
    ] {
        let updated = core
            .requests()
            .update_status(&ctx(), &id("2"), status)
            .unwrap();
        assert_eq!(updated.status, status);
    }
}

#[test]
fn unknown_id_is_not_found_and_changes_nothing() {
    let core = seeded();
    let before = core.requests().all().unwrap();
    let err = core
        .requests()
        .update_status(&ctx(), &id("404"), RequestStatus::Accepted)
        .unwrap_err();
    assert_eq!(err, RoadRemoteError::Request(RequestError::NotFound));
    assert_eq!(core.requests().all().unwrap(), before);
}

#[test]
fn pending_to_completed_is_rejected() {
    let core = seeded();
    let err = core
        .requests()
        .update_status(&ctx(), &id("1"), RequestStatus::Completed)
        .unwrap_err();
    assert_eq!(
        err,
        RoadRemoteError::Request(RequestError::InvalidTransition {
            from: RequestStatus::Pending,
            to: RequestStatus::Completed,
        })
    );
    let current = core.requests().get(&id("1")).unwrap().unwrap();
    assert_eq!(current.status, RequestStatus::Pending);
}

#[test]
fn second_accept_loses() {
    let core = seeded();
    core.requests()
        .update_status(&ctx(), &id("2"), RequestStatus::Accepted)
        .unwrap();
    let err = core
        .requests()
        .update_status(&ctx(), &id("2"), RequestStatus::Accepted)
        .unwrap_err();
    assert!(matches!(
        err,
        RoadRemoteError::Request(RequestError::InvalidTransition { .. })
    ));
}

#[test]
fn completed_cannot_reopen() {
    let core = seeded();
    let requests = core.requests();
    requests
        .update_status(&ctx(), &id("1"), RequestStatus::Accepted)
        .unwrap();
    requests
        .update_status(&ctx(), &id("1"), RequestStatus::Completed)
        .unwrap();
    for status in RequestStatus::ALL {
        assert!(requests.update_status(&ctx(), &id("1"), status).is_err());
    }
}

#[test]
fn create_rejects_duplicates_and_bad_input() {
    let core = seeded();
    let err = core
        .requests()
        .create(&ctx(), request_input("1", HelperType::Any))
        .unwrap_err();
    assert!(matches!(
        err,
        RoadRemoteError::Request(RequestError::Conflict { .. })
    ));

    let mut bad = request_input("3", HelperType::Any);
    bad.distance = -2.0;
    assert!(matches!(
        core.requests().create(&ctx(), bad),
        Err(RoadRemoteError::Request(RequestError::InvalidInput { .. }))
    ));
    assert_eq!(core.requests().all().unwrap().len(), 2);
}

#[test]
fn list_uses_filter() {
    let core = seeded();
    core.requests()
        .create(&ctx(), request_input("3", HelperType::Any))
        .unwrap();
    let open_to_volunteers = core
        .requests()
        .list(&RequestFilter {
            helper_type: Some(vec![HelperType::Volunteer, HelperType::Any]),
            status: Some(vec![RequestStatus::Pending]),
        })
        .unwrap();
    let ids: Vec<_> = open_to_volunteers
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, ["2", "3"]);
}

#[test]
fn listeners_fire_after_commits_only() {
    let core = seeded();
    let seen: Rc<RefCell<Vec<Event>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let listener = core.subscribe(move |record| {
        sink.borrow_mut().push(Event::try_from(record).unwrap());
    });

    core.requests()
        .update_status(&ctx(), &id("2"), RequestStatus::Accepted)
        .unwrap();
    let _ = core
        .requests()
        .update_status(&ctx(), &id("2"), RequestStatus::Accepted);
    let _ = core
        .requests()
        .update_status(&ctx(), &id("missing"), RequestStatus::Accepted);

    {
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        match &seen[0].body {
            EventBody::RequestStatusChanged { request, from, to } => {
                assert_eq!(request.id.as_str(), "2");
                assert_eq!(*from, RequestStatus::Pending);
                assert_eq!(*to, RequestStatus::Accepted);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(seen[0].source, EventSource::Cli);
    }

    assert!(core.unsubscribe(listener));
    core.requests()
        .update_status(&ctx(), &id("2"), RequestStatus::Completed)
        .unwrap();
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn listener_can_read_the_committed_snapshot() {
    let core = Rc::new(seeded());
    let observed = Rc::new(RefCell::new(None));
    let reader = Rc::clone(&core);
    let slot = Rc::clone(&observed);
    core.subscribe(move |_| {
        let status = reader
            .requests()
            .get(&RequestId::new("1").unwrap())
            .unwrap()
            .map(|r| r.status);
        *slot.borrow_mut() = status;
    });
    core.requests()
        .update_status(&ctx(), &id("1"), RequestStatus::Accepted)
        .unwrap();
    assert_eq!(*observed.borrow(), Some(RequestStatus::Accepted));
}

#[test]
fn bus_and_log_see_the_same_events() {
    let core = setup();
    let mut rx = core.event_bus().subscribe();
    core.requests()
        .create(&ctx(), request_input("9", HelperType::Any))
        .unwrap();
    core.requests()
        .update_status(&ctx(), &id("9"), RequestStatus::Accepted)
        .unwrap();

    let first = rx.try_recv().unwrap();
    let second = rx.try_recv().unwrap();
    assert_eq!(first.kind(), Some("RequestCreated"));
    assert_eq!(second.kind(), Some("RequestStatusChanged"));

    let log = core.events().list(None, None).unwrap();
    assert_eq!(log, vec![first, second.clone()]);
    assert_eq!(core.events().list(Some(1), None).unwrap(), vec![second]);
}

#[test]
fn volunteer_points_and_badges() {
    let core = setup();
    let volunteer = core
        .volunteers()
        .create(
            &ctx(),
            CreateVolunteerInput {
                id: Some(VolunteerId::new("v1").unwrap()),
                name: "Sam".to_string(),
                points: 5,
                badges: Vec::new(),
            },
        )
        .unwrap();

    let updated = core
        .volunteers()
        .award_points(&ctx(), &volunteer.id, 20)
        .unwrap();
    assert_eq!(updated.points, 25);
    assert!(matches!(
        core.volunteers().award_points(&ctx(), &volunteer.id, 0),
        Err(RoadRemoteError::Volunteer(VolunteerError::InvalidInput { .. }))
    ));

    let badge = |id: &str| AwardBadgeInput {
        id: BadgeId::new(id).unwrap(),
        name: format!("Badge {id}"),
        description: String::new(),
    };
    core.volunteers()
        .award_badge(&ctx(), &volunteer.id, badge("night-owl"))
        .unwrap();
    let updated = core
        .volunteers()
        .award_badge(&ctx(), &volunteer.id, badge("road-warrior"))
        .unwrap();
    let order: Vec<_> = updated.badges.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(order, ["night-owl", "road-warrior"]);
    assert!(updated.badges.iter().all(|b| b.earned_at.is_some()));

    assert_eq!(
        core.volunteers()
            .award_badge(&ctx(), &volunteer.id, badge("night-owl"))
            .unwrap_err(),
        RoadRemoteError::Volunteer(VolunteerError::DuplicateBadge {
            badge_id: BadgeId::new("night-owl").unwrap()
        })
    );
    assert_eq!(
        core.volunteers()
            .award_badge(&ctx(), &VolunteerId::new("ghost").unwrap(), badge("x"))
            .unwrap_err(),
        RoadRemoteError::Volunteer(VolunteerError::NotFound)
    );
}
