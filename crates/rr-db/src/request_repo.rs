use crate::util::{DbError, decode_enum, encode_enum, is_unique_violation, placeholders};
use rr_core::error::RequestError;
use rr_core::requests::RequestRepository;
use rr_core::types::{
    CreateHelpRequestInput, HelpRequest, RequestFilter, RequestId, RequestStatus,
};
use rusqlite::Connection;
use rusqlite::types::Value;

const COLUMNS: &str =
    "id, driver_name, vehicle, issue, location, distance, timestamp, helper_type, status";

pub struct RequestRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> RequestRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn load(&self, id: &RequestId) -> Result<Option<HelpRequest>, DbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM requests WHERE id = ?1"))?;
        let mut rows = stmt.query([id.as_str()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        map_request_row(row).map(Some)
    }
}

impl<'a> RequestRepository for RequestRepo<'a> {
    fn create(&self, input: CreateHelpRequestInput) -> Result<HelpRequest, RequestError> {
        let request = HelpRequest {
            id: input.id.unwrap_or_else(RequestId::generate),
            driver_name: input.driver_name,
            vehicle: input.vehicle,
            issue: input.issue,
            location: input.location,
            distance: input.distance,
            timestamp: input.timestamp,
            helper_type: input.helper_type,
            status: input.status.unwrap_or(RequestStatus::Pending),
        };
        let sql = format!("INSERT INTO requests ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)");
        let params = (
            request.id.as_str(),
            request.driver_name.as_str(),
            request.vehicle.as_str(),
            request.issue.as_str(),
            request.location.as_str(),
            request.distance,
            request.timestamp.as_str(),
            encode_enum(&request.helper_type)?,
            encode_enum(&request.status)?,
        );
        match self.conn.execute(&sql, params) {
            Ok(_) => Ok(request),
            Err(err) if is_unique_violation(&err) => Err(RequestError::Conflict {
                message: format!("request {} already exists", request.id),
            }),
            Err(err) => Err(DbError::from(err).into()),
        }
    }

    fn get(&self, id: &RequestId) -> Result<Option<HelpRequest>, RequestError> {
        Ok(self.load(id)?)
    }

    fn list(&self, filter: &RequestFilter) -> Result<Vec<HelpRequest>, RequestError> {
        let mut clauses = Vec::new();
        let mut params: Vec<Value> = Vec::new();
        if let Some(types) = &filter.helper_type {
            if types.is_empty() {
                return Ok(Vec::new());
            }
            clauses.push(format!(
                "helper_type IN ({})",
                placeholders(params.len(), types.len())
            ));
            for helper_type in types {
                params.push(encode_enum(helper_type)?.into());
            }
        }
        if let Some(statuses) = &filter.status {
            if statuses.is_empty() {
                return Ok(Vec::new());
            }
            clauses.push(format!(
                "status IN ({})",
                placeholders(params.len(), statuses.len())
            ));
            for status in statuses {
                params.push(encode_enum(status)?.into());
            }
        }

        let mut sql = format!("SELECT {COLUMNS} FROM requests");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY position ASC");

        let mut stmt = self.conn.prepare(&sql).map_err(DbError::from)?;
        let mut rows = stmt
            .query(rusqlite::params_from_iter(params))
            .map_err(DbError::from)?;
        let mut requests = Vec::new();
        while let Some(row) = rows.next().map_err(DbError::from)? {
            requests.push(map_request_row(row)?);
        }
        Ok(requests)
    }

    fn set_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<HelpRequest, RequestError> {
        let changed = self
            .conn
            .execute(
                "UPDATE requests SET status = ?1 WHERE id = ?2",
                (encode_enum(&status)?, id.as_str()),
            )
            .map_err(DbError::from)?;
        if changed == 0 {
            return Err(RequestError::NotFound);
        }
        self.load(id)?.ok_or(RequestError::NotFound)
    }
}

fn map_request_row(row: &rusqlite::Row<'_>) -> Result<HelpRequest, DbError> {
    let id: String = row.get(0)?;
    let helper_type: String = row.get(7)?;
    let status: String = row.get(8)?;
    Ok(HelpRequest {
        id: RequestId::new(id).map_err(|err| DbError::InvalidColumn {
            column: "id",
            message: err.to_string(),
        })?,
        driver_name: row.get(1)?,
        vehicle: row.get(2)?,
        issue: row.get(3)?,
        location: row.get(4)?,
        distance: row.get(5)?,
        timestamp: row.get(6)?,
        helper_type: decode_enum(&helper_type)?,
        status: decode_enum(&status)?,
    })
}
