use rr_core::RoadRemoteError;
use rr_core::store::Store;
use rusqlite::Connection;

use crate::event_repo::EventRepo;
use crate::request_repo::RequestRepo;
use crate::schema;
use crate::volunteer_repo::VolunteerRepo;

pub struct DbStore {
    conn: Connection,
}

impl DbStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// A fresh, migrated, in-memory store.
    pub fn in_memory() -> Result<Self, rusqlite::Error> {
        Ok(Self::new(schema::open_in_memory()?))
    }
}

impl Store for DbStore {
    type Requests<'a>
        = RequestRepo<'a>
    where
        Self: 'a;
    type Volunteers<'a>
        = VolunteerRepo<'a>
    where
        Self: 'a;
    type Events<'a>
        = EventRepo<'a>
    where
        Self: 'a;

    fn requests(&self) -> Self::Requests<'_> {
        RequestRepo::new(&self.conn)
    }

    fn volunteers(&self) -> Self::Volunteers<'_> {
        VolunteerRepo::new(&self.conn)
    }

    fn events(&self) -> Self::Events<'_> {
        EventRepo::new(&self.conn)
    }

    fn with_tx<F, T>(&self, f: F) -> Result<T, RoadRemoteError>
    where
        F: FnOnce(&Self) -> Result<T, RoadRemoteError>,
    {
        self.conn
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(internal)?;
        match f(self) {
            Ok(value) => match self.conn.execute_batch("COMMIT") {
                Ok(()) => Ok(value),
                Err(err) => {
                    // A failed COMMIT leaves the transaction open.
                    tracing::warn!(error = %err, "commit failed, rolling back");
                    let _ = self.conn.execute_batch("ROLLBACK");
                    Err(internal(err))
                }
            },
            Err(err) => {
                tracing::debug!(error = %err, "transaction rolled back");
                self.conn.execute_batch("ROLLBACK").map_err(internal)?;
                Err(err)
            }
        }
    }
}

fn internal(err: rusqlite::Error) -> RoadRemoteError {
    RoadRemoteError::Internal {
        message: err.to_string(),
    }
}
