pub mod dashboards;
pub mod error;
pub mod events;
pub mod requests;
pub mod roadremote;
pub mod seed;
pub mod store;
pub mod validation;
pub mod volunteers;

pub mod types;

pub use crate::error::RoadRemoteError;
pub use crate::roadremote::{RequestContext, RoadRemote};
pub use crate::store::Store;
