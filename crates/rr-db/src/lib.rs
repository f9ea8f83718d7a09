pub mod event_repo;
pub mod request_repo;
pub mod schema;
pub mod store;
pub mod util;
pub mod volunteer_repo;

pub use crate::store::DbStore;
pub use crate::util::DbError;
