use crate::error::VolunteerError;
use crate::types::{Badge, CreateVolunteerInput, Volunteer, VolunteerId};

pub trait VolunteerRepository {
    fn create(&self, input: CreateVolunteerInput) -> Result<Volunteer, VolunteerError>;
    fn get(&self, id: &VolunteerId) -> Result<Option<Volunteer>, VolunteerError>;
    /// Insertion order.
    fn list(&self) -> Result<Vec<Volunteer>, VolunteerError>;
    fn add_points(&self, id: &VolunteerId, points: u32) -> Result<Volunteer, VolunteerError>;
    fn add_badge(&self, id: &VolunteerId, badge: Badge) -> Result<Volunteer, VolunteerError>;
}
