use crate::util::{DbError, decode_json, encode_json, is_unique_violation};
use rr_core::error::VolunteerError;
use rr_core::types::{Badge, CreateVolunteerInput, Volunteer, VolunteerId};
use rr_core::volunteers::VolunteerRepository;
use rusqlite::Connection;

pub struct VolunteerRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> VolunteerRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn load(&self, id: &VolunteerId) -> Result<Option<Volunteer>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, points, badges FROM volunteers WHERE id = ?1")?;
        let mut rows = stmt.query([id.as_str()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        map_volunteer_row(row).map(Some)
    }

    fn save(&self, volunteer: &Volunteer) -> Result<(), DbError> {
        self.conn.execute(
            "UPDATE volunteers SET name = ?1, points = ?2, badges = ?3 WHERE id = ?4",
            (
                volunteer.name.as_str(),
                i64::from(volunteer.points),
                encode_json(&volunteer.badges)?,
                volunteer.id.as_str(),
            ),
        )?;
        Ok(())
    }
}

impl<'a> VolunteerRepository for VolunteerRepo<'a> {
    fn create(&self, input: CreateVolunteerInput) -> Result<Volunteer, VolunteerError> {
        let volunteer = Volunteer {
            id: input.id.unwrap_or_else(VolunteerId::generate),
            name: input.name,
            points: input.points,
            badges: input
                .badges
                .into_iter()
                .map(|badge| Badge {
                    id: badge.id,
                    name: badge.name,
                    description: badge.description,
                    earned_at: None,
                })
                .collect(),
        };
        let result = self.conn.execute(
            "INSERT INTO volunteers (id, name, points, badges) VALUES (?1, ?2, ?3, ?4)",
            (
                volunteer.id.as_str(),
                volunteer.name.as_str(),
                i64::from(volunteer.points),
                encode_json(&volunteer.badges)?,
            ),
        );
        match result {
            Ok(_) => Ok(volunteer),
            Err(err) if is_unique_violation(&err) => Err(VolunteerError::Conflict {
                message: format!("volunteer {} already exists", volunteer.id),
            }),
            Err(err) => Err(DbError::from(err).into()),
        }
    }

    fn get(&self, id: &VolunteerId) -> Result<Option<Volunteer>, VolunteerError> {
        Ok(self.load(id)?)
    }

    fn list(&self) -> Result<Vec<Volunteer>, VolunteerError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, points, badges FROM volunteers ORDER BY position ASC")
            .map_err(DbError::from)?;
        let mut rows = stmt.query([]).map_err(DbError::from)?;
        let mut volunteers = Vec::new();
        while let Some(row) = rows.next().map_err(DbError::from)? {
            volunteers.push(map_volunteer_row(row)?);
        }
        Ok(volunteers)
    }

    fn add_points(&self, id: &VolunteerId, points: u32) -> Result<Volunteer, VolunteerError> {
        let mut volunteer = self.load(id)?.ok_or(VolunteerError::NotFound)?;
        volunteer.points = volunteer.points.saturating_add(points);
        self.save(&volunteer)?;
        Ok(volunteer)
    }

    fn add_badge(&self, id: &VolunteerId, badge: Badge) -> Result<Volunteer, VolunteerError> {
        let mut volunteer = self.load(id)?.ok_or(VolunteerError::NotFound)?;
        if volunteer.has_badge(&badge.id) {
            return Err(VolunteerError::DuplicateBadge { badge_id: badge.id });
        }
        volunteer.badges.push(badge);
        self.save(&volunteer)?;
        Ok(volunteer)
    }
}

fn map_volunteer_row(row: &rusqlite::Row<'_>) -> Result<Volunteer, DbError> {
    let id: String = row.get(0)?;
    let points: i64 = row.get(2)?;
    let badges: String = row.get(3)?;
    Ok(Volunteer {
        id: VolunteerId::new(id).map_err(|err| DbError::InvalidColumn {
            column: "id",
            message: err.to_string(),
        })?,
        name: row.get(1)?,
        points: u32::try_from(points).map_err(|err| DbError::InvalidColumn {
            column: "points",
            message: err.to_string(),
        })?,
        badges: decode_json(&badges)?,
    })
}
