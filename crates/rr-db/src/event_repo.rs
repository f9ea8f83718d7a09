use crate::util::{DbError, decode_enum, decode_json, encode_enum, encode_json, from_rfc3339, to_rfc3339};
use rr_core::RoadRemoteError;
use rr_core::events::EventRepository;
use rr_events::types::EventRecord;
use rusqlite::Connection;
use rusqlite::types::Value;
use ulid::Ulid;

pub struct EventRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> EventRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl<'a> EventRepository for EventRepo<'a> {
    fn append(&self, mut event: EventRecord) -> Result<EventRecord, RoadRemoteError> {
        let seq = next_seq(self.conn)?;
        event.seq = seq;
        event.id = format!("evt_{}", Ulid::new());
        let sql = "INSERT INTO events (id, seq, at, correlation_id, source, body_json) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
        let params = (
            event.id.as_str(),
            event.seq,
            to_rfc3339(&event.at),
            event.correlation_id.as_deref(),
            encode_enum(&event.source)?,
            encode_json(&event.body)?,
        );
        self.conn.execute(sql, params).map_err(DbError::from)?;
        Ok(event)
    }

    fn list(
        &self,
        after: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<EventRecord>, RoadRemoteError> {
        Ok(list_events(self.conn, after, limit)?)
    }
}

fn list_events(
    conn: &Connection,
    after: Option<i64>,
    limit: Option<u32>,
) -> Result<Vec<EventRecord>, DbError> {
    let mut sql = String::from("SELECT id, seq, at, correlation_id, source, body_json FROM events");
    let mut params: Vec<Value> = Vec::new();
    if let Some(after) = after {
        sql.push_str(" WHERE seq > ?");
        params.push(after.into());
    }
    sql.push_str(" ORDER BY seq ASC");
    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        params.push(i64::from(limit).into());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;
    let mut events = Vec::new();
    while let Some(row) = rows.next()? {
        events.push(map_event_row(row)?);
    }
    Ok(events)
}

fn map_event_row(row: &rusqlite::Row<'_>) -> Result<EventRecord, DbError> {
    let at: String = row.get(2)?;
    let source: String = row.get(4)?;
    let body_json: String = row.get(5)?;
    Ok(EventRecord {
        id: row.get(0)?,
        seq: row.get(1)?,
        at: from_rfc3339(&at)?,
        correlation_id: row.get(3)?,
        source: decode_enum(&source)?,
        body: decode_json(&body_json)?,
    })
}

fn next_seq(conn: &Connection) -> Result<i64, DbError> {
    let seq: i64 = conn.query_row("SELECT COALESCE(MAX(seq), 0) FROM events", [], |row| {
        row.get(0)
    })?;
    Ok(seq + 1)
}
