use crate::RoadRemoteError;
use crate::events::EventRepository;
use crate::requests::RequestRepository;
use crate::volunteers::VolunteerRepository;

pub trait Store {
    type Requests<'a>: RequestRepository
    where
        Self: 'a;
    type Volunteers<'a>: VolunteerRepository
    where
        Self: 'a;
    type Events<'a>: EventRepository
    where
        Self: 'a;

    fn requests(&self) -> Self::Requests<'_>;
    fn volunteers(&self) -> Self::Volunteers<'_>;
    fn events(&self) -> Self::Events<'_>;

    /// Runs `f` atomically: either every write in `f` lands or none do.
    fn with_tx<F, T>(&self, f: F) -> Result<T, RoadRemoteError>
    where
        F: FnOnce(&Self) -> Result<T, RoadRemoteError>;
}
