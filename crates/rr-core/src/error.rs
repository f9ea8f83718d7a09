use crate::dashboards::Action;
use crate::types::enums::RequestStatus;
use crate::types::ids::BadgeId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("help request not found")]
    NotFound,
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },
    #[error("conflict: {message}")]
    Conflict { message: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum VolunteerError {
    #[error("volunteer not found")]
    NotFound,
    #[error("badge already earned: {badge_id}")]
    DuplicateBadge { badge_id: BadgeId },
    #[error("conflict: {message}")]
    Conflict { message: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    #[error("{action} is disabled while the request is {status}")]
    ActionDisabled {
        action: Action,
        status: RequestStatus,
    },
    #[error("dashboard is not accepting new requests")]
    Unavailable,
    #[error("request is not shown on this dashboard")]
    NotVisible,
}

#[derive(Debug, Error, PartialEq)]
pub enum SeedError {
    #[error("cannot read seed file {path}: {message}")]
    Read { path: String, message: String },
    #[error("cannot parse seed file {path}: {message}")]
    Parse { path: String, message: String },
    #[error("unsupported seed format: {path}")]
    UnsupportedFormat { path: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum RoadRemoteError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Volunteer(#[from] VolunteerError),
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error("internal error: {message}")]
    Internal { message: String },
}
