//! Initial store contents. Requests arrive in the store already populated;
//! a seed file is how they get there.

use crate::error::{RoadRemoteError, SeedError};
use crate::roadremote::{RequestContext, RoadRemote};
use crate::store::Store;
use crate::types::{CreateHelpRequestInput, CreateVolunteerInput, VolunteerId};
use rr_events::types::EventSource;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeedFile {
    /// Profile shown on the volunteer dashboard.
    #[serde(default)]
    pub active_volunteer: Option<VolunteerId>,
    #[serde(default, rename = "request", alias = "requests")]
    pub requests: Vec<CreateHelpRequestInput>,
    #[serde(default, rename = "volunteer", alias = "volunteers")]
    pub volunteers: Vec<CreateVolunteerInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub requests: usize,
    pub volunteers: usize,
}

pub fn parse_seed_toml(content: &str, origin: &str) -> Result<SeedFile, SeedError> {
    toml::from_str(content).map_err(|err| SeedError::Parse {
        path: origin.to_string(),
        message: err.to_string(),
    })
}

pub fn parse_seed_yaml(content: &str, origin: &str) -> Result<SeedFile, SeedError> {
    serde_yaml::from_str(content).map_err(|err| SeedError::Parse {
        path: origin.to_string(),
        message: err.to_string(),
    })
}

/// Reads a `.toml`, `.yaml` or `.yml` seed file.
pub fn load_seed(path: &Path) -> Result<SeedFile, SeedError> {
    let origin = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let parse: fn(&str, &str) -> Result<SeedFile, SeedError> = match extension.as_deref() {
        Some("toml") => parse_seed_toml,
        Some("yaml" | "yml") => parse_seed_yaml,
        _ => return Err(SeedError::UnsupportedFormat { path: origin }),
    };
    let content = fs::read_to_string(path).map_err(|err| SeedError::Read {
        path: origin.clone(),
        message: err.to_string(),
    })?;
    parse(&content, &origin)
}

/// Inserts every seeded volunteer and request, in file order.
pub fn apply_seed<S: Store>(
    core: &RoadRemote<S>,
    seed: &SeedFile,
) -> Result<SeedSummary, RoadRemoteError> {
    let ctx = RequestContext::from_source(EventSource::Seed);
    for volunteer in &seed.volunteers {
        core.volunteers().create(&ctx, volunteer.clone())?;
    }
    for request in &seed.requests {
        core.requests().create(&ctx, request.clone())?;
    }
    let summary = SeedSummary {
        requests: seed.requests.len(),
        volunteers: seed.volunteers.len(),
    };
    tracing::info!(
        requests = summary.requests,
        volunteers = summary.volunteers,
        "store seeded"
    );
    Ok(summary)
}
