pub mod enums;
pub mod event;
pub mod ids;
pub mod io;
pub mod request;
pub mod volunteer;

pub use enums::{HelperType, RequestStatus};
pub use event::{Event, EventBody};
pub use ids::{BadgeId, IdError, RequestId, VolunteerId};
pub use io::{AwardBadgeInput, CreateHelpRequestInput, CreateVolunteerInput, RequestFilter};
pub use request::HelpRequest;
pub use volunteer::{Badge, Volunteer};
